use crate::errors::PartialDataWarning;
use crate::models::series::{DataPoint, PointSeries, RawTimeSeries};

/// Convert a backend `timestamp-string → value` map into ordered points.
///
/// Bad entries are dropped; use [`to_point_series_checked`] to find out which.
pub fn to_point_series(raw: &RawTimeSeries) -> PointSeries {
    let mut warnings = Vec::new();
    to_point_series_checked(raw, &mut warnings)
}

/// Same as [`to_point_series`], recording every dropped entry in `warnings`.
///
/// - keys that are not decimal integers are skipped
/// - `null` values are skipped
/// - keys that parse to the same timestamp keep the lexicographically
///   smallest key, so the result never depends on source key order
pub fn to_point_series_checked(
    raw: &RawTimeSeries,
    warnings: &mut Vec<PartialDataWarning>,
) -> PointSeries {
    let mut parsed: Vec<(i64, &str, f64)> = Vec::with_capacity(raw.len());
    let mut skipped: Vec<PartialDataWarning> = Vec::new();

    for (key, value) in raw.iter() {
        let Ok(timestamp) = key.trim().parse::<i64>() else {
            skipped.push(PartialDataWarning::UnparseableTimestamp { key: key.clone() });
            continue;
        };
        match value {
            Some(v) if v.is_finite() => parsed.push((timestamp, key.as_str(), *v)),
            _ => skipped.push(PartialDataWarning::MissingValue { key: key.clone() }),
        }
    }

    parsed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    let mut points: Vec<DataPoint> = Vec::with_capacity(parsed.len());
    let mut last_key: &str = "";
    for (timestamp, key, value) in parsed {
        if points.last().is_some_and(|p| p.timestamp == timestamp) {
            skipped.push(PartialDataWarning::DuplicateTimestamp {
                kept: last_key.to_string(),
                dropped: key.to_string(),
            });
            continue;
        }
        last_key = key;
        points.push(DataPoint { timestamp, value });
    }

    if !skipped.is_empty() {
        // Sort so warning order is as deterministic as the points.
        skipped.sort_by_key(|w| w.to_string());
        tracing::warn!(
            skipped = skipped.len(),
            kept = points.len(),
            "dropped unusable time-series entries"
        );
        warnings.extend(skipped);
    }

    PointSeries::from_sorted(points)
}
