//! Reductions of collected readings and rainfall series into summaries.

use crate::types::month::Month;
use crate::types::observation::ObservationPoint;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Arithmetic mean of all readings, or `None` when there are none.
pub fn average(readings: &HashMap<String, f64>) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let sum: f64 = readings.values().sum();
    Some(sum / readings.len() as f64)
}

/// Rainfall summed over one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total: f64,
}

/// Rainfall of one station grouped by month.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// Date of the earliest point.
    pub from_date: NaiveDate,
    /// Date of the latest point.
    pub to_date: NaiveDate,
    /// Per-month totals in chronological order.
    pub monthly_totals: Vec<MonthlyTotal>,
    /// Sum of all monthly totals.
    pub grand_total: f64,
    /// Points that took part in the aggregation.
    pub point_count: usize,
    /// Of those, the points whose value did not parse and counted as 0.
    pub unparsed_count: usize,
}

/// Groups rainfall points by the UTC calendar month of their `from` timestamp
/// and sums each group.
///
/// Points with `from <= 0` are dropped before anything else, so they affect
/// neither the date range nor any sum. Points whose value does not parse add
/// nothing to the sums but still count towards the date range. Returns `None`
/// when no point is left.
///
/// `grand_total` is folded from the monthly totals in order, so it is always
/// exactly equal to their sum.
///
/// # Examples
///
/// ```
/// use smhi_report::{aggregate_rainfall, ObservationPoint};
///
/// let points = [
///     ObservationPoint::new(1740895201000, "2.3"),
///     ObservationPoint::new(1740981601000, "1.8"),
/// ];
/// let result = aggregate_rainfall(&points).unwrap();
/// assert_eq!(result.monthly_totals.len(), 1);
/// assert_eq!(result.monthly_totals[0].month.to_string(), "2025-03");
/// ```
pub fn aggregate_rainfall(points: &[ObservationPoint]) -> Option<AggregationResult> {
    let mut buckets: BTreeMap<Month, f64> = BTreeMap::new();
    let mut range: Option<(i64, i64)> = None;
    let mut point_count = 0;
    let mut unparsed_count = 0;

    for point in points {
        let Some(datetime) = point.from_datetime() else {
            continue;
        };
        point_count += 1;

        let value = match point.numeric_value() {
            Some(value) => value,
            None => {
                unparsed_count += 1;
                0.0
            }
        };
        *buckets.entry(Month::from(datetime)).or_insert(0.0) += value;

        range = Some(match range {
            Some((min, max)) => (min.min(point.from), max.max(point.from)),
            None => (point.from, point.from),
        });
    }

    let (min, max) = range?;
    let from_date = chrono::DateTime::from_timestamp_millis(min)?.date_naive();
    let to_date = chrono::DateTime::from_timestamp_millis(max)?.date_naive();

    let monthly_totals: Vec<MonthlyTotal> = buckets
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect();
    let grand_total = monthly_totals.iter().fold(0.0, |sum, m| sum + m.total);

    Some(AggregationResult {
        from_date,
        to_date,
        monthly_totals,
        grand_total,
        point_count,
        unparsed_count,
    })
}
