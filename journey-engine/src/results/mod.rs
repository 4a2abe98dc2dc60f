//! Journey results assembly.
//!
//! The pipeline's orchestrator: fetch a board, keep the services that
//! reach the destination, cap the list, classify each survivor.

mod engine;

pub use engine::{JourneyQuery, JourneyResult, MAX_RESULTS, ResultsEngine, ResultsError, assemble};
