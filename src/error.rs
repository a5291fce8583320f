/// Error type returned by this crate.
///
/// Every variant counts as a failed attempt and is retried the same way.
/// Only the error from the final attempt reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Response arrived with a status outside the 2xx range.
    #[error("HTTP {status}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body, empty if it could not be read.
        body: String,
    },
    /// Response body was not valid JSON for the requested type.
    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns the HTTP status for [`FetchError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
