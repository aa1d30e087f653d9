use thiserror::Error;

/// Custom error type for fetching, allow us to differentiate between failures.
///
/// None of these is fatal: the caller logs it and skips the dataset.
///
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Transport error: {0}")]
    OtherTransport(String),
}

impl FetchError {
    /// Short name of the failure, used in one-line reports.
    ///
    pub fn kind(&self) -> String {
        match self {
            FetchError::HttpStatus(code) => format!("HttpStatus({code})"),
            FetchError::ConnectionFailed(_) => "ConnectionFailed".to_string(),
            FetchError::Timeout(_) => "Timeout".to_string(),
            FetchError::OtherTransport(_) => "OtherTransport".to_string(),
        }
    }
}

/// Classify a `reqwest` failure.
///
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::ConnectionFailed(e.to_string())
        } else if let Some(code) = e.status() {
            FetchError::HttpStatus(code.as_u16())
        } else {
            FetchError::OtherTransport(e.to_string())
        }
    }
}
