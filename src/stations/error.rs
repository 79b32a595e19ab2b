use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse station directory from {0}")]
    JsonParse(String, #[source] serde_json::Error),
}
