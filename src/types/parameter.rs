//! Defines the observation parameters this crate knows how to fetch.

use std::fmt;

/// An SMHI observation parameter together with the "latest" period it is
/// fetched for.
///
/// Temperature is read for the latest hour, rainfall for the latest months.
/// The two are reduced differently: a temperature series is reduced to its
/// last value, a rainfall series is summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Air temperature, instantaneous value once per hour (SMHI parameter 1).
    Temperature,
    /// Precipitation, daily sum (SMHI parameter 5).
    Rainfall,
}

impl Parameter {
    /// The numeric SMHI parameter key.
    pub fn key(&self) -> u32 {
        match self {
            Parameter::Temperature => 1,
            Parameter::Rainfall => 5,
        }
    }

    pub(crate) fn period(&self) -> &'static str {
        match self {
            Parameter::Temperature => "latest-hour",
            Parameter::Rainfall => "latest-months",
        }
    }

    /// Relative resource path of the series for one station.
    pub(crate) fn series_path(&self, station_id: i64) -> String {
        format!(
            "parameter/{}/station/{}/period/{}/data.json",
            self.key(),
            station_id,
            self.period()
        )
    }

    /// Relative resource path of the station directory for this parameter.
    pub(crate) fn directory_path(&self) -> String {
        format!("parameter/{}.json", self.key())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Temperature => write!(f, "temperature"),
            Parameter::Rainfall => write!(f, "rainfall"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_paths() {
        assert_eq!(
            Parameter::Temperature.series_path(53430),
            "parameter/1/station/53430/period/latest-hour/data.json"
        );
        assert_eq!(
            Parameter::Rainfall.series_path(53430),
            "parameter/5/station/53430/period/latest-months/data.json"
        );
        assert_eq!(Parameter::Temperature.directory_path(), "parameter/1.json");
    }
}
