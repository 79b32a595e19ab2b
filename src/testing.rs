//! In-memory [`WeatherSource`] used by the unit tests.

use crate::observations::error::FetchError;
use crate::source::WeatherSource;
use crate::stations::error::DirectoryError;
use crate::types::observation::{ObservationPoint, ObservationSeries};
use crate::types::parameter::Parameter;
use crate::types::station::Station;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum FakeResponse {
    Series(ObservationSeries),
    /// The fetcher's own 404 handling: `Ok(None)`.
    Missing,
    /// A 404 surfaced as an error, as a source without 404 handling would.
    NotFoundError,
    Status(u16),
    Panic,
}

impl FakeResponse {
    pub(crate) fn values(values: &[&str]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, value)| ObservationPoint::new(1_740_000_000_000 + i as i64 * 3_600_000, *value))
            .collect();
        FakeResponse::Series(ObservationSeries::new(points))
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    stations: Option<Vec<Station>>,
    responses: HashMap<(i64, Parameter), FakeResponse>,
    delays: HashMap<i64, Duration>,
    calls: Mutex<Vec<i64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(stations: Vec<Station>) -> Self {
        Self {
            stations: Some(stations),
            ..Default::default()
        }
    }

    /// A source whose directory call fails.
    pub(crate) fn unavailable() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, id: i64, parameter: Parameter, response: FakeResponse) -> Self {
        self.responses.insert((id, parameter), response);
        self
    }

    pub(crate) fn delay(mut self, id: i64, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl WeatherSource for FakeSource {
    async fn fetch_stations(&self) -> Result<Vec<Station>, DirectoryError> {
        self.stations.clone().ok_or(DirectoryError::HttpStatus {
            url: "parameter/1.json".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        })
    }

    async fn fetch_series(
        &self,
        station_id: i64,
        parameter: Parameter,
    ) -> Result<Option<ObservationSeries>, FetchError> {
        self.calls.lock().unwrap().push(station_id);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.delays.get(&station_id).copied().unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let url = parameter.series_path(station_id);
        match self.responses.get(&(station_id, parameter)).cloned() {
            Some(FakeResponse::Series(series)) => Ok(Some(series)),
            Some(FakeResponse::Missing) | None => Ok(None),
            Some(FakeResponse::NotFoundError) => Err(FetchError::HttpStatus {
                url,
                status: StatusCode::NOT_FOUND,
            }),
            Some(FakeResponse::Status(code)) => Err(FetchError::HttpStatus {
                url,
                status: StatusCode::from_u16(code).unwrap(),
            }),
            Some(FakeResponse::Panic) => panic!("simulated fetch panic for station {}", station_id),
        }
    }
}

pub(crate) fn stations(names: &[(i64, &str)]) -> Vec<Station> {
    names
        .iter()
        .map(|(id, name)| Station::new(*id, *name))
        .collect()
}
