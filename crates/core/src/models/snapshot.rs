use serde::{Deserialize, Serialize};

use super::ordered_map::OrderedMap;
use super::series::ChartSeries;
use crate::errors::PartialDataWarning;

/// A single scalar for a number panel, optionally with a baseline for a
/// relative delta ("final value vs. amount invested").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub value: f64,

    /// Baseline for the delta display. `None` → bare number only.
    pub reference: Option<f64>,

    /// Rendered before the number, e.g. "$"
    pub prefix: String,

    /// Rendered after the number, e.g. " CAD"
    pub currency_suffix: String,
}

impl IndicatorValue {
    /// `(value - reference) / reference`, or `None` without a usable baseline.
    pub fn relative_delta(&self) -> Option<f64> {
        match self.reference {
            Some(r) if r != 0.0 => Some((self.value - r) / r),
            _ => None,
        }
    }

    pub fn has_delta(&self) -> bool {
        self.reference.is_some()
    }
}

/// The three value-over-time lines of the comparison panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSeries {
    pub portfolio: ChartSeries,
    pub cash_invested: ChartSeries,
    pub benchmark: ChartSeries,
}

impl ValueSeries {
    /// Render order: portfolio, cash invested, benchmark.
    pub fn as_array(&self) -> [&ChartSeries; 3] {
        [&self.portfolio, &self.cash_invested, &self.benchmark]
    }
}

/// The grouped daily-PnL bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlSeries {
    pub portfolio: ChartSeries,
    pub benchmark: ChartSeries,
}

impl PnlSeries {
    pub fn as_array(&self) -> [&ChartSeries; 2] {
        [&self.portfolio, &self.benchmark]
    }
}

/// The number panels of the comparison view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioIndicators {
    pub cash_invested: IndicatorValue,
    /// Delta anchored to cash invested
    pub portfolio_value: IndicatorValue,
    /// Delta anchored to cash invested
    pub benchmark_value: IndicatorValue,
}

/// Return on investment as reported by the backend, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiSummary {
    pub portfolio: f64,
    pub benchmark: f64,
}

/// Everything the comparison view paints, derived from one fetch.
///
/// Replaced wholesale on each successful fetch; never patched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    /// Ticker of the benchmark this data was fetched for
    pub benchmark: String,
    pub value_series: ValueSeries,
    pub pnl_series: PnlSeries,
    pub composition: ChartSeries,
    pub indicators: PortfolioIndicators,
    pub summaries: Vec<String>,
    pub roi: Option<RoiSummary>,
    /// Non-fatal problems absorbed while adapting the payload
    pub warnings: Vec<PartialDataWarning>,
}

/// The two number panels of a holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingIndicators {
    pub invested: IndicatorValue,
    /// Delta anchored to the invested amount
    pub final_value: IndicatorValue,
}

/// One ticker in the individual-holdings view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingSnapshot {
    pub indicators: HoldingIndicators,
    pub price_series: ChartSeries,
    pub overlay_series: ChartSeries,
    /// Percent, when the backend reports it
    pub roi: Option<f64>,
}

/// currency → ticker → holding, in backend key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiKeySnapshot {
    pub by_currency: OrderedMap<OrderedMap<HoldingSnapshot>>,
    pub warnings: Vec<PartialDataWarning>,
}

impl MultiKeySnapshot {
    pub fn get(&self, currency: &str, ticker: &str) -> Option<&HoldingSnapshot> {
        self.by_currency.get(currency)?.get(ticker)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.by_currency.keys()
    }

    /// Tickers of one currency group, in display order.
    pub fn tickers(&self, currency: &str) -> Vec<&str> {
        self.by_currency
            .get(currency)
            .map(|holdings| holdings.keys().collect())
            .unwrap_or_default()
    }

    /// Total number of holdings across all currencies.
    pub fn holding_count(&self) -> usize {
        self.by_currency.values().map(|h| h.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.holding_count() == 0
    }
}
