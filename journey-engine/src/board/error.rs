//! Departure fetch error types.

/// User-facing message for a fetch that timed out.
const TIMEOUT_MESSAGE: &str = "Timed out after 1 minute. Please try again.";

/// User-facing message for every other fetch failure.
const FETCH_FAILED_MESSAGE: &str = "Unable to fetch departures. Please try again.";

/// Errors from the departures provider client.
///
/// The `Network`/`Upstream` distinction exists for logging; both surface
/// the same user-visible message. `Timeout` is kept distinct so the caller
/// can tell the user how long they waited.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The provider did not respond within the configured deadline.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure (DNS, connection, TLS).
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The provider's payload could not be parsed.
    #[error("invalid upstream payload: {message}")]
    Json {
        message: String,
        /// Bounded prefix of the offending body, for diagnostics.
        body: Option<String>,
    },
}

impl BoardError {
    /// The message to show the user. Collapses the transport/upstream
    /// distinction; the caller offers manual re-submission in both cases.
    pub fn user_message(&self) -> &'static str {
        match self {
            BoardError::Timeout => TIMEOUT_MESSAGE,
            BoardError::Network(_) | BoardError::Upstream { .. } | BoardError::Json { .. } => {
                FETCH_FAILED_MESSAGE
            }
        }
    }
}

impl From<reqwest::Error> for BoardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BoardError::Timeout
        } else {
            BoardError::Network(err)
        }
    }
}
