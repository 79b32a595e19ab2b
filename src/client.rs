//! HTTP implementation of [`WeatherSource`] against the SMHI metobs API.

use crate::error::ReportError;
use crate::observations::error::FetchError;
use crate::source::WeatherSource;
use crate::stations::error::DirectoryError;
use crate::types::observation::ObservationSeries;
use crate::types::parameter::Parameter;
use crate::types::station::{Station, StationDirectory};
use bon::bon;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://opendata-download-metobs.smhi.se/api/version/latest/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the SMHI open data observation API.
///
/// # Examples
///
/// ```no_run
/// # use smhi_report::{SmhiClient, ReportError, WeatherSource};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ReportError> {
/// let client = SmhiClient::builder().build()?;
/// let stations = client.fetch_stations().await?;
/// println!("{} stations report temperature", stations.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SmhiClient {
    http: Client,
    base_url: String,
    directory_parameter: Parameter,
}

#[bon]
impl SmhiClient {
    /// Creates a client.
    ///
    /// * `.base_url(..)`: API root, defaults to [`DEFAULT_BASE_URL`]. A missing
    ///   trailing slash is added.
    /// * `.timeout(..)`: per-request timeout, defaults to 30 seconds.
    /// * `.directory_parameter(..)`: which parameter's station list forms the
    ///   directory, defaults to [`Parameter::Temperature`].
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
        directory_parameter: Option<Parameter>,
    ) -> Result<Self, ReportError> {
        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let http = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .map_err(ReportError::ClientBuild)?;
        Ok(Self {
            http,
            base_url,
            directory_parameter: directory_parameter.unwrap_or(Parameter::Temperature),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl WeatherSource for SmhiClient {
    async fn fetch_stations(&self) -> Result<Vec<Station>, DirectoryError> {
        let url = self.url(&self.directory_parameter.directory_path());
        info!("Fetching station directory from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::HttpStatus { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::NetworkRequest(url.clone(), e))?;
        let directory: StationDirectory =
            serde_json::from_slice(&body).map_err(|e| DirectoryError::JsonParse(url.clone(), e))?;

        let stations = directory.into_stations();
        info!("Station directory lists {} stations", stations.len());
        Ok(stations)
    }

    async fn fetch_series(
        &self,
        station_id: i64,
        parameter: Parameter,
    ) -> Result<Option<ObservationSeries>, FetchError> {
        let url = self.url(&parameter.series_path(station_id));

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No {} series for station {} (404)", parameter, station_id);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;
        let series: ObservationSeries =
            serde_json::from_slice(&body).map_err(|e| FetchError::JsonParse(url.clone(), e))?;
        Ok(Some(series))
    }
}
