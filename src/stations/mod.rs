//! Station directory helpers.

pub mod error;

use crate::types::station::Station;

/// Finds the station for a city name.
///
/// An exact, case-insensitive name match wins; otherwise the first station
/// whose name contains `city` (case-insensitive) is returned. Stations without
/// a name never match.
pub fn find_by_city<'a>(stations: &'a [Station], city: &str) -> Option<&'a Station> {
    let needle = city.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let lowered_name = |station: &Station| station.name.as_ref().map(|name| name.to_lowercase());

    stations
        .iter()
        .find(|station| lowered_name(station).is_some_and(|name| name == needle))
        .or_else(|| {
            stations
                .iter()
                .find(|station| lowered_name(station).is_some_and(|name| name.contains(&needle)))
        })
}
