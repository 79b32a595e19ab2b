//! Concurrent fan-out of per-station fetches into a shared reading map.

use crate::observations::{fetch_latest, LatestReading};
use crate::source::WeatherSource;
use crate::types::parameter::Parameter;
use crate::types::station::Station;
use bon::bon;
use futures_util::future::join_all;
use log::{error, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};

/// Readings gathered from many stations, with the reasons stations were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedReadings {
    /// Latest value per station name.
    pub readings: HashMap<String, f64>,
    /// Stations without a series for the parameter (404).
    pub not_found: usize,
    /// Stations whose series was absent or whose last value did not parse.
    pub no_value: usize,
    /// Stations whose fetch failed for any other reason.
    pub failed: usize,
}

impl CollectedReadings {
    /// Total number of stations that contributed no reading.
    pub fn skipped(&self) -> usize {
        self.not_found + self.no_value + self.failed
    }
}

#[derive(Debug, Default)]
struct SkipCounters {
    not_found: AtomicUsize,
    no_value: AtomicUsize,
    failed: AtomicUsize,
}

/// Fetches the latest value of a parameter for every station concurrently.
///
/// Every station gets its own task. By default all fetches are in flight at
/// once; `max_concurrency` caps the number of simultaneous requests.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    max_concurrency: Option<usize>,
}

#[bon]
impl Collector {
    /// Creates a collector. A `max_concurrency` of zero means unbounded.
    #[builder]
    pub fn new(max_concurrency: Option<usize>) -> Self {
        Self {
            max_concurrency: max_concurrency.filter(|limit| *limit > 0),
        }
    }

    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    /// Collects the latest `parameter` reading of each station.
    ///
    /// Returns once every spawned fetch has finished. A failing station never
    /// aborts its siblings: failures are logged and counted in the result.
    /// Station names are the map keys; when two stations share a name the one
    /// that finishes last wins.
    pub async fn collect_readings<S>(
        &self,
        source: Arc<S>,
        stations: &[Station],
        parameter: Parameter,
    ) -> CollectedReadings
    where
        S: WeatherSource + 'static,
    {
        info!(
            "Collecting {} for {} stations (max concurrency: {:?})",
            parameter,
            stations.len(),
            self.max_concurrency
        );

        let readings = Arc::new(Mutex::new(HashMap::with_capacity(stations.len())));
        let counters = Arc::new(SkipCounters::default());
        let limiter = self.max_concurrency.map(|limit| Arc::new(Semaphore::new(limit)));

        let tasks: Vec<_> = stations
            .iter()
            .cloned()
            .map(|station| {
                let source = Arc::clone(&source);
                let readings = Arc::clone(&readings);
                let counters = Arc::clone(&counters);
                let limiter = limiter.clone();

                tokio::spawn(async move {
                    let _permit = match limiter {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };

                    match fetch_latest(source.as_ref(), &station, parameter).await {
                        LatestReading::Value(value) => {
                            let name = station.display_name();
                            if readings.lock().await.insert(name.clone(), value).is_some() {
                                warn!("Station name '{}' reported twice, keeping the latest reading", name);
                            }
                        }
                        LatestReading::NoValue => {
                            counters.no_value.fetch_add(1, Ordering::Relaxed);
                        }
                        LatestReading::NotFound => {
                            counters.not_found.fetch_add(1, Ordering::Relaxed);
                        }
                        LatestReading::Failed(_) => {
                            counters.failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();

        for joined in join_all(tasks).await {
            if let Err(e) = joined {
                error!("Station fetch task did not complete: {}", e);
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        let readings = std::mem::take(&mut *readings.lock().await);
        let collected = CollectedReadings {
            readings,
            not_found: counters.not_found.load(Ordering::Relaxed),
            no_value: counters.no_value.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
        };
        info!(
            "Collected {} {} readings, skipped {} stations",
            collected.readings.len(),
            parameter,
            collected.skipped()
        );
        collected
    }
}
