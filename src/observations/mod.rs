//! Per-station observation fetching and the classification of its outcome.

pub mod error;

use crate::observations::error::FetchError;
use crate::source::WeatherSource;
use crate::types::parameter::Parameter;
use crate::types::station::Station;
use log::{debug, warn};

/// The outcome of reading the latest value of one station.
#[derive(Debug)]
pub enum LatestReading {
    /// The last point of the series carried a numeric value.
    Value(f64),
    /// A series came back but it was absent or its last value did not parse.
    NoValue,
    /// The station has no series for the parameter.
    NotFound,
    /// The fetch failed for any other reason.
    Failed(FetchError),
}

impl LatestReading {
    pub fn value(&self) -> Option<f64> {
        match self {
            LatestReading::Value(value) => Some(*value),
            _ => None,
        }
    }
}

/// Fetches `parameter` for `station` and reduces the series to its latest value.
///
/// Never fails: every failure mode is folded into a [`LatestReading`] variant
/// and logged, 404s at `debug` and everything else at `warn`.
pub async fn fetch_latest<S>(source: &S, station: &Station, parameter: Parameter) -> LatestReading
where
    S: WeatherSource,
{
    match source.fetch_series(station.id, parameter).await {
        Ok(Some(series)) => match series.latest_value() {
            Some(value) => LatestReading::Value(value),
            None => LatestReading::NoValue,
        },
        Ok(None) => LatestReading::NotFound,
        Err(e) if e.is_not_found() => {
            debug!(
                "{} data not found for {} (404)",
                parameter,
                station.display_name()
            );
            LatestReading::NotFound
        }
        Err(e) => {
            warn!(
                "Failed to get {} for {}: {}",
                parameter,
                station.display_name(),
                e
            );
            LatestReading::Failed(e)
        }
    }
}
