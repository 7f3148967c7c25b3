use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::errors::PartialDataWarning;
use crate::models::series::{
    ChartSeries, MarkerPoint, NamedColor, SeriesColor, SeriesData, SeriesKind,
};
use crate::models::transaction::{Transaction, TransactionSide};

/// Naive formats tried in order after RFC 3339. `%.f` also matches no
/// fraction at all.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a transaction's calendar date into Unix milliseconds.
///
/// Unlike time-series keys, transaction dates are human calendar strings
/// ("2025-03-10 18:00:00", "2023-05-01"), never epoch numbers.
///
/// Dates without an offset are read as UTC, which is also how the price
/// keys are expressed. A backend that writes exchange-local wall-clock
/// times (e.g. New York) will see its markers shifted by that offset; send
/// an RFC 3339 offset to avoid it.
pub fn parse_transaction_date(date: &str) -> Option<i64> {
    let date = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.timestamp_millis());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Hover text for a marker: `"<side> $<price> (<quantity>)"`.
pub fn marker_label(txn: &Transaction) -> String {
    format!("{} ${} ({})", txn.side, txn.price, txn.quantity)
}

fn side_color(side: TransactionSide) -> NamedColor {
    match side {
        TransactionSide::Buy => NamedColor::Green,
        TransactionSide::Sell => NamedColor::Red,
    }
}

/// Buy/sell markers for a price chart, in input order.
pub fn build_overlay(transactions: &[Transaction]) -> ChartSeries {
    build_overlay_checked(transactions, &mut Vec::new())
}

/// Same as [`build_overlay`], recording transactions dropped for an
/// unparseable date. No sorting or dedup: the backend's order is kept.
pub fn build_overlay_checked(
    transactions: &[Transaction],
    warnings: &mut Vec<PartialDataWarning>,
) -> ChartSeries {
    let mut markers = Vec::with_capacity(transactions.len());
    let mut colors = Vec::with_capacity(transactions.len());

    for txn in transactions {
        let Some(timestamp) = parse_transaction_date(&txn.date) else {
            tracing::warn!(date = %txn.date, "skipping transaction with unparseable date");
            warnings.push(PartialDataWarning::UnparseableTransactionDate {
                date: txn.date.clone(),
            });
            continue;
        };
        markers.push(MarkerPoint {
            timestamp,
            value: txn.price,
            label: marker_label(txn),
        });
        colors.push(side_color(txn.side));
    }

    ChartSeries::new(
        SeriesKind::MarkerOverlay,
        "Transactions",
        SeriesData::Markers(markers),
        SeriesColor::PerPoint(colors),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_formats() {
        // 2025-03-10T18:00:00Z
        assert_eq!(parse_transaction_date("2025-03-10 18:00:00"), Some(1_741_629_600_000));
        assert_eq!(parse_transaction_date("2025-03-10 18:00"), Some(1_741_629_600_000));
        assert_eq!(parse_transaction_date("2025-03-10T18:00:00"), Some(1_741_629_600_000));
        assert_eq!(
            parse_transaction_date("2025-03-10T13:00:00-05:00"),
            Some(1_741_629_600_000)
        );
    }

    #[test]
    fn parses_fractional_seconds_and_short_times() {
        // 2023-05-01T10:00:00Z
        let base = 1_682_935_200_000;
        assert_eq!(parse_transaction_date("2023-05-01T10:00:00.123"), Some(base + 123));
        assert_eq!(parse_transaction_date("2023-05-01T10:00:00.123456"), Some(base + 123));
        assert_eq!(parse_transaction_date("2023-05-01 10:00:00.500000"), Some(base + 500));
        assert_eq!(parse_transaction_date("2023-05-01T10:00"), Some(base));
    }

    #[test]
    fn naive_times_are_utc() {
        assert_eq!(
            parse_transaction_date("2025-02-06 09:30:00"),
            parse_transaction_date("2025-02-06T09:30:00Z")
        );
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        assert_eq!(parse_transaction_date("2023-05-01"), Some(1_682_899_200_000));
    }

    #[test]
    fn epoch_strings_are_not_dates() {
        assert_eq!(parse_transaction_date("1682899200000"), None);
        assert_eq!(parse_transaction_date(""), None);
    }

    #[test]
    fn label_uses_shortest_number_form() {
        let txn = Transaction::new("2025-03-20", TransactionSide::Sell, 15.11, 151.0);
        assert_eq!(marker_label(&txn), "sell $15.11 (151)");
        let txn = Transaction::new("2025-03-20", TransactionSide::Buy, 7.5, 0.25);
        assert_eq!(marker_label(&txn), "buy $7.5 (0.25)");
    }
}
