//! The three weather reports: nationwide average temperature, rainfall per
//! city and the live temperature scan.

use crate::aggregate::{aggregate_rainfall, average, AggregationResult};
use crate::clock::Clock;
use crate::collector::{CollectedReadings, Collector};
use crate::error::ReportError;
use crate::scanner::{ScanEntry, ScanReport, Scanner};
use crate::source::WeatherSource;
use crate::stations::find_by_city;
use crate::types::parameter::Parameter;
use crate::types::station::Station;
use bon::bon;
use log::{error, info, warn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Average of the latest-hour temperature over all stations.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSummary {
    /// `None` when no station produced a reading.
    pub average: Option<f64>,
    pub station_count: usize,
    pub collected: CollectedReadings,
}

impl TemperatureSummary {
    pub fn skipped(&self) -> usize {
        self.collected.skipped()
    }
}

/// Why a rainfall report has no totals.
#[derive(Debug, Clone, PartialEq)]
pub enum NoRainfallData {
    /// The station has no rainfall series, or the series is empty.
    SeriesMissing,
    /// The series has points, but none with a usable timestamp.
    NoValidPoints,
    /// The series could not be fetched.
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RainfallOutcome {
    Totals(AggregationResult),
    NoData(NoRainfallData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainfallReport {
    pub city: String,
    pub station: Station,
    pub outcome: RainfallOutcome,
    /// Points dropped because their `from` timestamp was not positive.
    pub excluded_points: usize,
}

/// Runs the reports against a [`WeatherSource`].
///
/// Only a failed station directory fetch is an error; per-station problems
/// are absorbed and reported as counts or "no data" outcomes.
pub struct WeatherReport<S, C> {
    source: Arc<S>,
    clock: C,
    collector: Collector,
    scanner: Scanner,
}

#[bon]
impl<S, C> WeatherReport<S, C>
where
    S: WeatherSource + 'static,
    C: Clock,
{
    #[builder]
    pub fn new(
        source: Arc<S>,
        clock: C,
        #[builder(default)] collector: Collector,
        #[builder(default)] scanner: Scanner,
    ) -> Self {
        Self {
            source,
            clock,
            collector,
            scanner,
        }
    }

    async fn stations(&self) -> Result<Vec<Station>, ReportError> {
        self.source.fetch_stations().await.map_err(|e| {
            error!("Station directory fetch failed: {}", e);
            ReportError::from(e)
        })
    }

    /// Averages the latest temperature of every station in the directory.
    pub async fn average_temperature(&self) -> Result<TemperatureSummary, ReportError> {
        info!("Calculating average temperature (last hour)...");
        let stations = self.stations().await?;

        let collected = self
            .collector
            .collect_readings(Arc::clone(&self.source), &stations, Parameter::Temperature)
            .await;

        let average = average(&collected.readings);
        match average {
            Some(avg) => info!("Average temperature calculated: {:.1} °C", avg),
            None => warn!("No temperature data found for averaging"),
        }

        Ok(TemperatureSummary {
            average,
            station_count: stations.len(),
            collected,
        })
    }

    /// Sums the latest-months rainfall of the station matching `city`, per month.
    pub async fn rainfall_for_city(&self, city: &str) -> Result<RainfallReport, ReportError> {
        info!("Calculating total rainfall in {} (last months)...", city);
        let stations = self.stations().await?;

        let station = find_by_city(&stations, city).cloned().ok_or_else(|| {
            warn!("No station found matching '{}'", city);
            ReportError::NoStationForCity {
                city: city.to_string(),
            }
        })?;
        info!(
            "{} resolved to station {} ({})",
            city,
            station.id,
            station.display_name()
        );

        let mut excluded_points = 0;
        let outcome = match self.source.fetch_series(station.id, Parameter::Rainfall).await {
            Ok(Some(series)) => match series.points {
                Some(points) if !points.is_empty() => match aggregate_rainfall(&points) {
                    Some(result) => {
                        excluded_points = points.len() - result.point_count;
                        info!(
                            "Total rainfall in {}: {:.1} mm over {} months",
                            city,
                            result.grand_total,
                            result.monthly_totals.len()
                        );
                        RainfallOutcome::Totals(result)
                    }
                    None => {
                        excluded_points = points.len();
                        warn!("No valid rainfall measurements retrieved for {}", city);
                        RainfallOutcome::NoData(NoRainfallData::NoValidPoints)
                    }
                },
                _ => {
                    warn!("No rainfall data retrieved for {}", city);
                    RainfallOutcome::NoData(NoRainfallData::SeriesMissing)
                }
            },
            Ok(None) => {
                warn!("No rainfall data retrieved for {}", city);
                RainfallOutcome::NoData(NoRainfallData::SeriesMissing)
            }
            Err(e) if e.is_not_found() => {
                warn!("No rainfall data retrieved for {}", city);
                RainfallOutcome::NoData(NoRainfallData::SeriesMissing)
            }
            Err(e) => {
                warn!("Rainfall fetch failed for {}: {}", city, e);
                RainfallOutcome::NoData(NoRainfallData::FetchFailed(e.to_string()))
            }
        };

        Ok(RainfallReport {
            city: city.to_string(),
            station,
            outcome,
            excluded_points,
        })
    }

    /// Walks all stations one by one, handing each latest temperature to
    /// `on_entry`, until finished or until `token` is cancelled.
    pub async fn scan_temperatures<F>(
        &self,
        token: &CancellationToken,
        on_entry: F,
    ) -> Result<ScanReport, ReportError>
    where
        F: FnMut(ScanEntry),
    {
        info!("Starting temperature display with cancellation support...");
        let stations = self.stations().await?;

        let report = self
            .scanner
            .scan(
                self.source.as_ref(),
                &self.clock,
                &stations,
                Parameter::Temperature,
                token,
                on_entry,
            )
            .await;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::scanner::{CancelPoint, ScanOutcome};
    use crate::testing::{stations, FakeResponse, FakeSource};
    use crate::types::observation::{ObservationPoint, ObservationSeries};
    use std::time::Duration;

    fn report(source: FakeSource) -> WeatherReport<FakeSource, SystemClock> {
        WeatherReport::builder()
            .source(Arc::new(source))
            .clock(SystemClock)
            .scanner(Scanner::builder().delay(Duration::from_millis(1)).build())
            .build()
    }

    #[tokio::test]
    async fn test_average_temperature() -> Result<(), ReportError> {
        let stations = stations(&[(1, "A"), (2, "B"), (3, "C"), (4, "D")]);
        let source = FakeSource::new(stations)
            .respond(1, Parameter::Temperature, FakeResponse::values(&["9.9", "1.2"]))
            .respond(2, Parameter::Temperature, FakeResponse::values(&["2.3"]))
            .respond(3, Parameter::Temperature, FakeResponse::values(&["3.5"]))
            .respond(4, Parameter::Temperature, FakeResponse::Missing);

        let summary = report(source).average_temperature().await?;

        let average = summary.average.expect("average present");
        assert!((average - 2.3333333333).abs() < 1e-9);
        assert_eq!(summary.station_count, 4);
        assert_eq!(summary.skipped(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_average_without_any_reading_is_no_data() -> Result<(), ReportError> {
        let stations = stations(&[(1, "A"), (2, "B")]);
        let source = FakeSource::new(stations)
            .respond(1, Parameter::Temperature, FakeResponse::Status(503));

        let summary = report(source).average_temperature().await?;

        assert_eq!(summary.average, None);
        assert_eq!(summary.skipped(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_directory_failure_is_fatal() {
        let result = report(FakeSource::unavailable()).average_temperature().await;
        assert!(matches!(result, Err(ReportError::DirectoryUnavailable(_))));

        let result = report(FakeSource::unavailable())
            .scan_temperatures(&CancellationToken::new(), |_| {})
            .await;
        assert!(matches!(result, Err(ReportError::DirectoryUnavailable(_))));
    }

    #[tokio::test]
    async fn test_rainfall_for_city() -> Result<(), ReportError> {
        let stations = stations(&[(53430, "Lund"), (97400, "Arlanda")]);
        let series = ObservationSeries::new(vec![
            ObservationPoint::new(0, "99.0"),
            ObservationPoint::new(1740895201000, "2.3"),
            ObservationPoint::new(1740981601000, "1.8"),
        ]);
        let source = FakeSource::new(stations)
            .respond(53430, Parameter::Rainfall, FakeResponse::Series(series));

        let report = report(source).rainfall_for_city("lund").await?;

        assert_eq!(report.station.id, 53430);
        assert_eq!(report.excluded_points, 1);
        let RainfallOutcome::Totals(totals) = &report.outcome else {
            panic!("expected totals, got {:?}", report.outcome);
        };
        assert_eq!(totals.monthly_totals.len(), 1);
        assert!((totals.grand_total - 4.1).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn test_rainfall_no_data_outcomes() -> Result<(), ReportError> {
        let stations = stations(&[(1, "Lund"), (2, "Visby"), (3, "Kiruna"), (4, "Umeå")]);
        let source = FakeSource::new(stations)
            .respond(1, Parameter::Rainfall, FakeResponse::Missing)
            .respond(
                2,
                Parameter::Rainfall,
                FakeResponse::Series(ObservationSeries::new(vec![ObservationPoint::new(0, "1")])),
            )
            .respond(3, Parameter::Rainfall, FakeResponse::Status(500))
            .respond(4, Parameter::Rainfall, FakeResponse::Series(ObservationSeries::default()));
        let report = report(source);

        assert_eq!(
            report.rainfall_for_city("Lund").await?.outcome,
            RainfallOutcome::NoData(NoRainfallData::SeriesMissing)
        );
        let visby = report.rainfall_for_city("Visby").await?;
        assert_eq!(visby.outcome, RainfallOutcome::NoData(NoRainfallData::NoValidPoints));
        assert_eq!(visby.excluded_points, 1);
        assert!(matches!(
            report.rainfall_for_city("Kiruna").await?.outcome,
            RainfallOutcome::NoData(NoRainfallData::FetchFailed(_))
        ));
        assert_eq!(
            report.rainfall_for_city("Umeå").await?.outcome,
            RainfallOutcome::NoData(NoRainfallData::SeriesMissing)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_rainfall_unknown_city() {
        let source = FakeSource::new(stations(&[(1, "Lund")]));
        let result = report(source).rainfall_for_city("Kiruna").await;
        assert!(matches!(
            result,
            Err(ReportError::NoStationForCity { city }) if city == "Kiruna"
        ));
    }

    #[tokio::test]
    async fn test_scan_temperatures() -> Result<(), ReportError> {
        let stations = stations(&[(1, "A"), (2, "B"), (3, "C")]);
        let source = FakeSource::new(stations)
            .respond(1, Parameter::Temperature, FakeResponse::values(&["1.5"]))
            .respond(3, Parameter::Temperature, FakeResponse::values(&["-2.0"]));
        let token = CancellationToken::new();
        let trigger = token.clone();
        let mut names = Vec::new();

        let scan = report(source)
            .scan_temperatures(&token, |entry| {
                names.push(entry.station.display_name());
                if entry.station.id == 2 {
                    trigger.cancel();
                }
            })
            .await?;

        assert_eq!(scan.outcome, ScanOutcome::Cancelled(CancelPoint::DuringDelay));
        assert_eq!(scan.processed, 2);
        assert_eq!(names, ["A", "B"]);
        Ok(())
    }
}
