//! The seam between the aggregation pipeline and the observation API.

use crate::observations::error::FetchError;
use crate::stations::error::DirectoryError;
use crate::types::observation::ObservationSeries;
use crate::types::parameter::Parameter;
use crate::types::station::Station;
use std::future::Future;

/// Something that can list stations and fetch per-station observation series.
///
/// [`crate::SmhiClient`] is the HTTP implementation. The returned futures must
/// be `Send` so the collector can spawn one task per station.
pub trait WeatherSource: Send + Sync {
    /// Resolves the full list of known stations.
    ///
    /// An empty directory is `Ok(vec![])`; only a failed call is an error.
    fn fetch_stations(&self) -> impl Future<Output = Result<Vec<Station>, DirectoryError>> + Send;

    /// Fetches the latest-period series of `parameter` for one station.
    ///
    /// Returns `Ok(None)` when the station has no data for the parameter
    /// (upstream 404).
    fn fetch_series(
        &self,
        station_id: i64,
        parameter: Parameter,
    ) -> impl Future<Output = Result<Option<ObservationSeries>, FetchError>> + Send;
}
