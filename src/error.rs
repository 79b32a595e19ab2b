use crate::stations::error::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Station directory is unavailable")]
    DirectoryUnavailable(#[from] DirectoryError),

    #[error("No station found matching '{city}'")]
    NoStationForCity { city: String },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
