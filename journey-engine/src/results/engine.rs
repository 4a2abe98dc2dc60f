//! Journey results assembly.
//!
//! Orchestrates the departure source and the classifier: fetches the
//! origin board, keeps only services that reach the destination without
//! a change of train, caps the list, and attaches a status to each
//! surviving record.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::debug;

use crate::board::{BoardError, DepartureSource, RawDeparture, classify};
use crate::domain::{Crs, DepartureStatus};

/// Maximum number of services in one assembled view. Boards are long;
/// the traveller cares about the next few departures.
pub const MAX_RESULTS: usize = 8;

/// The parameters driving one fetch-and-filter cycle.
///
/// Both codes are optional because the query is derived from navigation
/// state that may be incomplete; `get_results` reports
/// `MissingParameters` rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyQuery {
    /// Origin station.
    pub from: Option<Crs>,

    /// Destination station.
    pub to: Option<Crs>,
}

impl JourneyQuery {
    /// Build a query from two resolved codes.
    pub fn new(from: Crs, to: Crs) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// One assembled result: the raw record paired with its status.
#[derive(Debug, Clone)]
pub struct JourneyResult {
    /// The raw departure record, for display fields the status doesn't
    /// carry (times, destination name, operator, platform).
    pub departure: RawDeparture,

    /// The classified status.
    pub status: DepartureStatus,
}

/// Errors from results assembly.
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    /// The query is incomplete; distinct from "fetched zero results".
    #[error("missing journey parameters: both origin and destination are required")]
    MissingParameters,

    /// A newer query started while this one was in flight; the stale
    /// result must be discarded, not applied.
    #[error("superseded by a newer query")]
    Superseded,

    /// The fetch itself failed.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Filter, cap and classify a fetched board against a destination.
///
/// A record survives iff its final stop is `to` or `to` appears among
/// its calling points - direct or through services only, never an
/// interchange. The first `MAX_RESULTS` survivors are kept in upstream
/// order. Zero survivors is a valid result (no direct service), not an
/// error.
pub fn assemble(records: Vec<RawDeparture>, to: &Crs) -> Vec<JourneyResult> {
    records
        .into_iter()
        .filter(|dep| dep.reaches(to))
        .take(MAX_RESULTS)
        .map(|departure| {
            let status = classify(&departure);
            JourneyResult { departure, status }
        })
        .collect()
}

/// Journey results engine.
///
/// Owns the departure source plus the little bit of state the caller
/// needs around a suspending fetch: a loading flag (so the UI can avoid
/// starting a duplicate fetch for the same query) and a query generation
/// counter (so a superseded in-flight fetch is discarded when a newer
/// query lands before it completes).
pub struct ResultsEngine<C> {
    source: C,
    generation: AtomicU64,
    loading: AtomicBool,
}

impl<C: DepartureSource> ResultsEngine<C> {
    /// Create an engine over the given departure source.
    pub fn new(source: C) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
            loading: AtomicBool::new(false),
        }
    }

    /// Whether a results fetch is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Fetch, filter and classify results for one journey query.
    ///
    /// Requires both station codes; fails fast with `MissingParameters`
    /// otherwise. A call that is overtaken by a newer one returns
    /// `Superseded` instead of a stale view.
    pub async fn get_results(
        &self,
        query: &JourneyQuery,
    ) -> Result<Vec<JourneyResult>, ResultsError> {
        let (Some(from), Some(to)) = (query.from, query.to) else {
            return Err(ResultsError::MissingParameters);
        };

        // Claim a new generation before suspending; any later call
        // invalidates this one.
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);

        let fetched = self.source.fetch_board(&from).await;

        if self.generation.load(Ordering::SeqCst) != my_generation {
            // A newer query owns the loading flag now; leave it alone.
            return Err(ResultsError::Superseded);
        }

        self.loading.store(false, Ordering::SeqCst);

        let records = fetched?;
        let results = assemble(records, &to);

        debug!(
            from = %from,
            to = %to,
            kept = results.len(),
            "assembled journey results"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::board::{MockBoardClient, RouteStop, StationDetail};

    fn crs(code: &str) -> Crs {
        Crs::parse(code).unwrap()
    }

    fn stop(code: &str) -> RouteStop {
        RouteStop {
            station_code: Some(code.into()),
            station_name: None,
        }
    }

    fn to_station(code: &str) -> RawDeparture {
        RawDeparture {
            aimed_departure_time: Some("10:00".into()),
            expected_departure_time: Some("On time".into()),
            station_detail: Some(StationDetail {
                destination: Some(stop(code)),
                calling_at: None,
            }),
            ..RawDeparture::default()
        }
    }

    fn calling_at(codes: &[&str]) -> RawDeparture {
        RawDeparture {
            aimed_departure_time: Some("10:00".into()),
            expected_departure_time: Some("On time".into()),
            station_detail: Some(StationDetail {
                destination: Some(stop("ZZZ")),
                calling_at: Some(codes.iter().map(|code| stop(code)).collect()),
            }),
            ..RawDeparture::default()
        }
    }

    #[test]
    fn assemble_keeps_direct_and_through_services() {
        let records = vec![
            to_station("RDG"),       // direct final stop
            calling_at(&["RDG"]),    // intermediate call
            to_station("BRI"),       // wrong destination
            calling_at(&["SWI"]),    // doesn't call at RDG
            RawDeparture::default(), // no route detail at all
        ];

        let results = assemble(records, &crs("RDG"));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn assemble_caps_at_eight_in_upstream_order() {
        let records: Vec<RawDeparture> = (0..12)
            .map(|i| RawDeparture {
                aimed_departure_time: Some(format!("10:{i:02}")),
                ..to_station("RDG")
            })
            .collect();

        let results = assemble(records, &crs("RDG"));
        assert_eq!(results.len(), MAX_RESULTS);
        // Upstream order preserved, no re-sorting
        assert_eq!(
            results[0].departure.aimed_departure_time.as_deref(),
            Some("10:00")
        );
        assert_eq!(
            results[7].departure.aimed_departure_time.as_deref(),
            Some("10:07")
        );
    }

    #[test]
    fn assemble_classifies_each_survivor() {
        let records = vec![
            RawDeparture {
                expected_departure_time: Some("10:17".into()),
                ..to_station("RDG")
            },
            RawDeparture {
                is_cancelled: Some(true),
                ..to_station("RDG")
            },
        ];

        let results = assemble(records, &crs("RDG"));
        assert_eq!(results[0].status.minutes_late(), Some(17));
        assert!(results[0].status.compensation_eligible());
        assert!(matches!(
            results[1].status,
            DepartureStatus::Cancelled { .. }
        ));
    }

    #[test]
    fn assemble_with_no_survivors_is_empty_not_error() {
        let results = assemble(vec![to_station("BRI")], &crs("RDG"));
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn missing_parameters_reported_before_any_fetch() {
        let engine = ResultsEngine::new(MockBoardClient::new());

        let query = JourneyQuery {
            from: Some(crs("PAD")),
            to: None,
        };
        assert!(matches!(
            engine.get_results(&query).await,
            Err(ResultsError::MissingParameters)
        ));

        let query = JourneyQuery {
            from: None,
            to: Some(crs("RDG")),
        };
        assert!(matches!(
            engine.get_results(&query).await,
            Err(ResultsError::MissingParameters)
        ));
    }

    #[tokio::test]
    async fn get_results_fetches_filters_and_classifies() {
        let board = vec![
            to_station("RDG"),
            to_station("BRI"),
            RawDeparture {
                expected_departure_time: Some("10:20".into()),
                ..calling_at(&["RDG", "SWI"])
            },
        ];
        let source = MockBoardClient::new().with_board(crs("PAD"), board);
        let engine = ResultsEngine::new(source);

        let results = engine
            .get_results(&JourneyQuery::new(crs("PAD"), crs("RDG")))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, DepartureStatus::OnTime);
        assert_eq!(results[1].status.minutes_late(), Some(20));
        assert!(!engine.is_loading());
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        // No board registered for PAD: the mock answers 404
        let engine = ResultsEngine::new(MockBoardClient::new());

        let err = engine
            .get_results(&JourneyQuery::new(crs("PAD"), crs("RDG")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResultsError::Board(BoardError::Upstream { status: 404, .. })
        ));
        assert!(!engine.is_loading());
    }

    mod supersession {
        use super::*;

        use std::sync::Arc;
        use tokio::sync::{Semaphore, mpsc};

        /// Source whose fetches block until released, signalling each
        /// arrival so the test can sequence overlapping calls.
        #[derive(Clone)]
        struct GatedSource {
            started: mpsc::UnboundedSender<Crs>,
            gate: Arc<Semaphore>,
        }

        impl GatedSource {
            fn new() -> (Self, mpsc::UnboundedReceiver<Crs>) {
                let (started, started_rx) = mpsc::unbounded_channel();
                let source = Self {
                    started,
                    gate: Arc::new(Semaphore::new(0)),
                };
                (source, started_rx)
            }
        }

        impl DepartureSource for GatedSource {
            async fn fetch_board(
                &self,
                station: &Crs,
            ) -> Result<Vec<RawDeparture>, BoardError> {
                let _ = self.started.send(*station);
                let permit = self.gate.acquire().await.expect("gate closed");
                permit.forget();
                Ok(vec![to_station("RDG")])
            }
        }

        #[tokio::test]
        async fn superseded_call_is_discarded() {
            let (source, mut started) = GatedSource::new();
            let gate = source.gate.clone();
            let engine = Arc::new(ResultsEngine::new(source));

            let first = {
                let engine = engine.clone();
                tokio::spawn(async move {
                    engine
                        .get_results(&JourneyQuery::new(crs("PAD"), crs("RDG")))
                        .await
                })
            };
            // First fetch is in flight
            assert_eq!(started.recv().await, Some(crs("PAD")));
            assert!(engine.is_loading());

            let second = {
                let engine = engine.clone();
                tokio::spawn(async move {
                    engine
                        .get_results(&JourneyQuery::new(crs("KGX"), crs("RDG")))
                        .await
                })
            };
            // Second fetch has claimed a newer generation
            assert_eq!(started.recv().await, Some(crs("KGX")));

            // Release both fetches
            gate.add_permits(2);

            let first = first.await.unwrap();
            let second = second.await.unwrap();

            assert!(matches!(first, Err(ResultsError::Superseded)));
            assert_eq!(second.unwrap().len(), 1);
            assert!(!engine.is_loading());
        }
    }
}
