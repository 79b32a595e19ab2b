use reqwest::StatusCode;
use thiserror::Error;

/// A failed per-station series fetch.
///
/// A plain 404 is not an error: the fetcher reports it as "no series". The
/// [`FetchError::is_not_found`] check exists for sources that do surface it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Failed to parse observation series from {0}")]
    JsonParse(String, #[source] serde_json::Error),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::HttpStatus { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            FetchError::NetworkRequest(_, source) => source.status(),
            FetchError::JsonParse(..) => None,
        }
    }
}
