//! Defines the SMHI weather station metadata as returned by the parameter
//! station directory.

use serde::{Deserialize, Serialize};

/// Represents a single SMHI observation station.
///
/// Only the fields this crate needs are modelled; the directory payload carries
/// many more (owner, active period, measuring stations) which are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// The unique SMHI station identifier (e.g. `53430` for Lund).
    pub id: i64,
    /// Human readable station name, if the directory provides one.
    #[serde(default)]
    pub name: Option<String>,
    /// Height above sea level in meters.
    #[serde(default)]
    pub height: Option<f64>,
    /// Latitude in decimal degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Station {
    /// Creates a station with only an id and name, leaving the location unset.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            height: None,
            latitude: None,
            longitude: None,
        }
    }

    /// The name used as key in reading maps and in console output.
    ///
    /// Stations without a name fall back to `Station_{id}`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Station_{}", self.id),
        }
    }
}

/// Wire shape of `parameter/{n}.json`.
///
/// An absent or `null` station list is treated as an empty directory.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct StationDirectory {
    #[serde(default)]
    pub station: Option<Vec<Station>>,
}

impl StationDirectory {
    pub(crate) fn into_stations(self) -> Vec<Station> {
        self.station.unwrap_or_default()
    }
}
