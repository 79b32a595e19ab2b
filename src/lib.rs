mod aggregate;
mod client;
mod clock;
mod collector;
mod error;
mod observations;
mod report;
mod scanner;
mod source;
mod stations;
mod types;
mod utils;

#[cfg(test)]
mod testing;

pub use client::{SmhiClient, DEFAULT_BASE_URL};
pub use error::ReportError;
pub use source::WeatherSource;

pub use aggregate::*;
pub use clock::*;
pub use collector::*;
pub use report::*;
pub use scanner::*;

pub use observations::{fetch_latest, LatestReading};
pub use stations::find_by_city;
pub use utils::format_decimal;

pub use types::month::Month;
pub use types::observation::{parse_numeric, ObservationPoint, ObservationSeries};
pub use types::parameter::Parameter;
pub use types::station::Station;

pub use observations::error::FetchError;
pub use stations::error::DirectoryError;

pub use tokio_util::sync::CancellationToken;
