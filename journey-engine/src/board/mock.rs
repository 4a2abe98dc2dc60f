//! Mock departure source for testing without provider access.
//!
//! Loads sample boards from JSON files and serves them as if they were
//! live responses.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::Crs;

use super::error::BoardError;
use super::types::{BoardResponse, RawDeparture};

/// Mock departure source serving boards from fixture data.
///
/// Useful for development and testing without real provider credentials.
#[derive(Debug, Clone, Default)]
pub struct MockBoardClient {
    /// Pre-loaded boards, keyed by origin CRS.
    boards: HashMap<Crs, Vec<RawDeparture>>,
}

impl MockBoardClient {
    /// Create an empty mock with no boards registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock by loading JSON files from a directory.
    ///
    /// Expects files named `{CRS}.json` (e.g. `PAD.json`), each holding a
    /// full board response.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, BoardError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| BoardError::Upstream {
            status: 0,
            message: format!("failed to read mock data directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| BoardError::Upstream {
                status: 0,
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Extract CRS from filename (e.g. "PAD.json" -> "PAD")
            let crs_str =
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| BoardError::Upstream {
                        status: 0,
                        message: format!("invalid filename: {path:?}"),
                    })?;

            let crs = Crs::parse(crs_str).map_err(|_| BoardError::Upstream {
                status: 0,
                message: format!("invalid CRS in filename: {crs_str}"),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| BoardError::Upstream {
                status: 0,
                message: format!("failed to read {path:?}: {e}"),
            })?;

            let board: BoardResponse =
                serde_json::from_str(&json).map_err(|e| BoardError::Json {
                    message: format!("failed to parse {path:?}: {e}"),
                    body: None,
                })?;

            boards.insert(crs, board.into_departures());
        }

        if boards.is_empty() {
            return Err(BoardError::Upstream {
                status: 0,
                message: format!("no mock board files found in {data_dir:?}"),
            });
        }

        Ok(Self { boards })
    }

    /// Register a board for a station, replacing any existing one.
    pub fn with_board(mut self, crs: Crs, departures: Vec<RawDeparture>) -> Self {
        self.boards.insert(crs, departures);
        self
    }

    /// List stations with registered boards.
    pub fn available_stations(&self) -> Vec<Crs> {
        self.boards.keys().copied().collect()
    }

    /// Fetch the board for a station, mimicking the live client interface.
    pub async fn fetch_board(&self, station: &Crs) -> Result<Vec<RawDeparture>, BoardError> {
        self.boards
            .get(station)
            .cloned()
            .ok_or_else(|| BoardError::Upstream {
                status: 404,
                message: format!(
                    "no mock data for station {}. Available: {:?}",
                    station.as_str(),
                    self.boards.keys().map(|c| c.as_str()).collect::<Vec<_>>()
                ),
            })
    }
}

impl super::DepartureSource for MockBoardClient {
    async fn fetch_board(&self, station: &Crs) -> Result<Vec<RawDeparture>, BoardError> {
        MockBoardClient::fetch_board(self, station).await
    }
}
