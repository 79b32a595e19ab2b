//! Sequential, cancellable walk over stations with a pause between each one.

use crate::clock::{Clock, DelayOutcome};
use crate::observations::{fetch_latest, LatestReading};
use crate::source::WeatherSource;
use crate::types::parameter::Parameter;
use crate::types::station::Station;
use bon::bon;
use log::info;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const SCAN_DELAY: Duration = Duration::from_millis(100);

/// Where in the loop a cancellation was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelPoint {
    /// The token was already cancelled when the next station was due.
    BeforeStation,
    /// The token fired while waiting between two stations.
    DuringDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed,
    Cancelled(CancelPoint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Value,
    NoValue,
    NotFound,
    Failed,
}

/// The result for one station, emitted as soon as it is known.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanEntry {
    pub station: Station,
    pub value: Option<f64>,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// Stations whose entry was emitted before the scan ended.
    pub processed: usize,
    pub elapsed_millis: i64,
}

/// Walks stations one at a time, emitting each reading and pausing between
/// stations. Unlike the collector this never runs fetches concurrently.
#[derive(Debug, Clone, Copy)]
pub struct Scanner {
    delay: Duration,
}

impl Default for Scanner {
    fn default() -> Self {
        Self { delay: SCAN_DELAY }
    }
}

#[bon]
impl Scanner {
    /// Creates a scanner; `delay` defaults to [`SCAN_DELAY`].
    #[builder]
    pub fn new(delay: Option<Duration>) -> Self {
        Self {
            delay: delay.unwrap_or(SCAN_DELAY),
        }
    }

    /// Scans `stations` in order until done or until `token` is cancelled.
    ///
    /// The token is checked before every station and raced against every
    /// pause, so a cancellation stops the scan without waiting for the pause
    /// to run out. A station that cannot be read is emitted with no value and
    /// the scan moves on.
    pub async fn scan<S, C, F>(
        &self,
        source: &S,
        clock: &C,
        stations: &[Station],
        parameter: Parameter,
        token: &CancellationToken,
        mut on_entry: F,
    ) -> ScanReport
    where
        S: WeatherSource,
        C: Clock,
        F: FnMut(ScanEntry),
    {
        let started = clock.now_epoch_millis();
        let mut processed = 0;

        let report = |outcome: ScanOutcome, processed: usize| ScanReport {
            outcome,
            processed,
            elapsed_millis: clock.now_epoch_millis() - started,
        };

        for station in stations {
            if token.is_cancelled() {
                info!("Scan cancelled after {} stations", processed);
                return report(ScanOutcome::Cancelled(CancelPoint::BeforeStation), processed);
            }

            let (value, status) = match fetch_latest(source, station, parameter).await {
                LatestReading::Value(value) => (Some(value), EntryStatus::Value),
                LatestReading::NoValue => (None, EntryStatus::NoValue),
                LatestReading::NotFound => (None, EntryStatus::NotFound),
                LatestReading::Failed(_) => (None, EntryStatus::Failed),
            };
            on_entry(ScanEntry {
                station: station.clone(),
                value,
                status,
            });
            processed += 1;

            if clock.delay(self.delay, token).await == DelayOutcome::Cancelled {
                info!("Scan cancelled during delay after {} stations", processed);
                return report(ScanOutcome::Cancelled(CancelPoint::DuringDelay), processed);
            }
        }

        info!("Scan finished, {} stations processed", processed);
        report(ScanOutcome::Completed, processed)
    }
}
