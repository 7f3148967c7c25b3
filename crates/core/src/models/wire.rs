//! Backend payload types, exactly as the dashboard API sends them.
//!
//! Conversion into chart series happens in `services::snapshot_service`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ordered_map::OrderedMap;
use super::series::RawTimeSeries;
use super::transaction::Transaction;
use crate::errors::CoreError;

/// A field whose JSON value is itself a JSON document encoded as a string.
///
/// The backend double-encodes `investment_comp`, `pnl_data` and `prices`.
/// An already-decoded value is accepted too, so a backend that stops
/// double-encoding keeps working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodedJson {
    Text(String),
    Inline(serde_json::Value),
}

impl EncodedJson {
    /// Parse the inner document into `T`. `field` names the payload field in
    /// the error message.
    pub fn decode<T: DeserializeOwned>(&self, field: &str) -> Result<T, CoreError> {
        let decoded = match self {
            EncodedJson::Text(text) => serde_json::from_str(text),
            EncodedJson::Inline(value) => serde_json::from_value(value.clone()),
        };
        decoded.map_err(|e| CoreError::malformed(format!("{field}: {e}")))
    }
}

impl From<serde_json::Value> for EncodedJson {
    /// Strings become `Text` (to be parsed again), anything else `Inline`.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => EncodedJson::Text(s),
            other => EncodedJson::Inline(other),
        }
    }
}

/// A decoded list of time series: either a JSON array, or a JSON object keyed
/// by column name (how the backend's dataframe serialiser lays them out).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComponentList {
    List(Vec<RawTimeSeries>),
    Columns(OrderedMap<RawTimeSeries>),
}

impl ComponentList {
    /// The series in positional order.
    pub fn into_vec(self) -> Vec<RawTimeSeries> {
        match self {
            ComponentList::List(list) => list,
            ComponentList::Columns(columns) => columns.into_iter().map(|(_, s)| s).collect(),
        }
    }
}

// ── POST /comparison ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRequest {
    /// Benchmark ticker, e.g. "^IXIC"
    pub comparison: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub labels: Vec<String>,
    pub sizes: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInfo {
    pub cash_invested: f64,
    pub portfolio_value: f64,
    pub comp_value: f64,
    #[serde(default)]
    pub roi_portfolio: Option<f64>,
    #[serde(default)]
    pub roi_comp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    /// Portfolio value, cash invested, benchmark value (in that order)
    pub investment_comp: EncodedJson,
    /// Portfolio daily % PnL, benchmark % PnL
    pub pnl_data: EncodedJson,
    pub composition: Composition,
    pub info: ComparisonInfo,
    #[serde(default)]
    pub summaries: Vec<String>,
}

impl ComparisonResponse {
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_body(body: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(body)?)
    }
}

// ── GET /indiv_performance ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingPerformance {
    pub total_invested: f64,
    pub final_value: f64,
    #[serde(rename = "ROI", default)]
    pub roi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HoldingResponse {
    pub performance: HoldingPerformance,
    pub prices: EncodedJson,
    pub transactions: Vec<Transaction>,
}

/// currency → ticker → holding, in backend key order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IndivPerfResponse(pub OrderedMap<OrderedMap<HoldingResponse>>);

impl IndivPerfResponse {
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_body(body: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(body)?)
    }
}
