use serde::{Deserialize, Serialize};

/// Side of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TransactionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionSide::Buy => write!(f, "buy"),
            TransactionSide::Sell => write!(f, "sell"),
        }
    }
}

/// A single buy/sell as reported by the backend.
///
/// `date` is kept verbatim; it is a calendar date/time string, not the
/// millisecond-epoch keys used by time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,

    /// The backend calls this field `type`.
    #[serde(alias = "type")]
    pub side: TransactionSide,

    pub price: f64,

    pub quantity: f64,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        side: TransactionSide,
        price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            date: date.into(),
            side,
            price,
            quantity,
        }
    }
}
