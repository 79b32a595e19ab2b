//! Defines the raw observation series returned per station and parameter,
//! and the numeric extraction applied to its string values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One raw observation point.
///
/// SMHI transports measurement values as JSON strings. A missing or
/// non-numeric value is kept as-is and only resolved by
/// [`ObservationPoint::numeric_value`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ObservationPoint {
    /// Start of the observation interval, epoch milliseconds. Latest-hour
    /// payloads call this field `date`.
    #[serde(default, alias = "date")]
    pub from: i64,
    /// End of the observation interval, epoch milliseconds.
    #[serde(default)]
    pub to: i64,
    #[serde(default, deserialize_with = "deserialize_value")]
    pub value: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}

impl ObservationPoint {
    pub fn new(from: i64, value: impl Into<String>) -> Self {
        Self {
            from,
            to: 0,
            value: Some(value.into()),
            quality: None,
        }
    }

    /// The value parsed as a number, or `None` when it is absent or not numeric.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_deref().and_then(parse_numeric)
    }

    /// The `from` timestamp as a UTC datetime.
    ///
    /// Returns `None` for the `from <= 0` sentinel and for timestamps chrono
    /// cannot represent.
    pub fn from_datetime(&self) -> Option<DateTime<Utc>> {
        if self.from <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.from)
    }
}

/// The series of points for one station and parameter.
///
/// `points` is `None` when the payload carries no `value` list at all, which
/// SMHI uses for "no data in this period". That is different from an empty list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ObservationSeries {
    #[serde(default, rename = "value")]
    pub points: Option<Vec<ObservationPoint>>,
}

impl ObservationSeries {
    pub fn new(points: Vec<ObservationPoint>) -> Self {
        Self {
            points: Some(points),
        }
    }

    /// Numeric value of the last point in the series.
    ///
    /// Only the last point is considered: if it is not numeric the series has
    /// no latest value, even when earlier points are.
    pub fn latest_value(&self) -> Option<f64> {
        self.points.as_ref()?.last()?.numeric_value()
    }
}

/// Parses a measurement using the invariant number format.
///
/// Accepts an optional sign, a `.` decimal separator and an exponent, with
/// surrounding whitespace. Empty input, anything else, and non-finite results
/// (`NaN`, `inf`) give `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

// Values are strings on the wire, but a number or null must not fail the whole payload.
fn deserialize_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<RawValue>::deserialize(deserializer)?.map(|raw| match raw {
            RawValue::Text(text) => text,
            RawValue::Number(number) => number.to_string(),
        }),
    )
}
