use std::time::Duration;

/// Failure of a single request, captured in its `FetchResult`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid header {0}")]
    InvalidHeader(String),
}

/// Failure of a whole batch, fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("blocked (HTTP 403) on attempt {attempt} with profile `{profile}`, no fallback left")]
    Blocked { attempt: usize, profile: String },
    #[error("no usable response out of {0} requests")]
    EmptyResult(usize),
    #[error("no header profile for attempt {0}")]
    NoProfile(usize),
}
