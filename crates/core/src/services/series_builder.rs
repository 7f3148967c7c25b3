use crate::errors::{CoreError, PartialDataWarning};
use crate::models::benchmark::FALLBACK_LABEL;
use crate::models::series::{
    CategorySlice, ChartSeries, NamedColor, PointSeries, RawTimeSeries, SeriesColor, SeriesData,
    SeriesKind,
};
use crate::models::snapshot::{IndicatorValue, PnlSeries, ValueSeries};
use crate::services::time_series::to_point_series_checked;

const INDICATOR_PREFIX: &str = "$";

/// The three value-over-time inputs of the comparison chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonComponents {
    pub portfolio: RawTimeSeries,
    pub cash_invested: RawTimeSeries,
    pub benchmark: RawTimeSeries,
}

impl TryFrom<Vec<RawTimeSeries>> for ComparisonComponents {
    type Error = CoreError;

    /// Positional form: `[portfolio, cash invested, benchmark]`.
    fn try_from(series: Vec<RawTimeSeries>) -> Result<Self, Self::Error> {
        let [portfolio, cash_invested, benchmark]: [RawTimeSeries; 3] =
            series.try_into().map_err(|v: Vec<RawTimeSeries>| {
                CoreError::malformed(format!(
                    "investment_comp: expected 3 series, got {}",
                    v.len()
                ))
            })?;
        Ok(Self {
            portfolio,
            cash_invested,
            benchmark,
        })
    }
}

/// The two daily-PnL inputs (percent change per day).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnlComponents {
    pub portfolio: RawTimeSeries,
    pub benchmark: RawTimeSeries,
}

impl TryFrom<Vec<RawTimeSeries>> for PnlComponents {
    type Error = CoreError;

    /// Positional form: `[portfolio, benchmark]`.
    fn try_from(series: Vec<RawTimeSeries>) -> Result<Self, Self::Error> {
        let [portfolio, benchmark]: [RawTimeSeries; 2] =
            series.try_into().map_err(|v: Vec<RawTimeSeries>| {
                CoreError::malformed(format!("pnl_data: expected 2 series, got {}", v.len()))
            })?;
        Ok(Self {
            portfolio,
            benchmark,
        })
    }
}

/// Turns adapted time series into named, styled chart series.
///
/// Holds only labelling context (display currency, benchmark name); every
/// build method is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuilder {
    display_currency: String,
    benchmark_label: String,
}

impl SeriesBuilder {
    pub fn new(display_currency: impl Into<String>) -> Self {
        Self {
            display_currency: display_currency.into(),
            benchmark_label: FALLBACK_LABEL.to_string(),
        }
    }

    /// Name used for the benchmark lines and bars, e.g. "NASDAQ".
    pub fn with_benchmark_label(mut self, label: impl Into<String>) -> Self {
        self.benchmark_label = label.into();
        self
    }

    pub fn display_currency(&self) -> &str {
        &self.display_currency
    }

    pub fn benchmark_label(&self) -> &str {
        &self.benchmark_label
    }

    // ── Value comparison ────────────────────────────────────────────

    pub fn build_comparison_series(&self, components: &ComparisonComponents) -> ValueSeries {
        self.build_comparison_series_checked(components, &mut Vec::new())
    }

    /// Each series is adapted on its own; timestamps are not aligned.
    pub fn build_comparison_series_checked(
        &self,
        components: &ComparisonComponents,
        warnings: &mut Vec<PartialDataWarning>,
    ) -> ValueSeries {
        let cur = &self.display_currency;
        ValueSeries {
            portfolio: line(
                format!("Portfolio Value ({cur})"),
                to_point_series_checked(&components.portfolio, warnings),
                NamedColor::CornflowerBlue,
            ),
            cash_invested: line(
                format!("Cash Invested ({cur})"),
                to_point_series_checked(&components.cash_invested, warnings),
                NamedColor::Orange,
            ),
            benchmark: line(
                format!("{} Value ({cur})", self.benchmark_label),
                to_point_series_checked(&components.benchmark, warnings),
                NamedColor::SeaGreen,
            ),
        }
    }

    // ── Daily PnL ───────────────────────────────────────────────────

    pub fn build_pnl_series(&self, components: &PnlComponents) -> PnlSeries {
        self.build_pnl_series_checked(components, &mut Vec::new())
    }

    /// Bars are colored point by point from the sign of the series' own value.
    pub fn build_pnl_series_checked(
        &self,
        components: &PnlComponents,
        warnings: &mut Vec<PartialDataWarning>,
    ) -> PnlSeries {
        let portfolio = to_point_series_checked(&components.portfolio, warnings);
        let benchmark = to_point_series_checked(&components.benchmark, warnings);
        PnlSeries {
            portfolio: bars(
                "Portfolio Daily % PnL".to_string(),
                portfolio,
                NamedColor::Green,
                NamedColor::DarkGreen,
            ),
            benchmark: bars(
                format!("{} % PnL", self.benchmark_label),
                benchmark,
                NamedColor::Orange,
                NamedColor::DarkOrange,
            ),
        }
    }

    // ── Composition ─────────────────────────────────────────────────

    /// Sizes are passed through as-is; the renderer normalises the pie.
    pub fn build_composition_series(
        &self,
        labels: &[String],
        sizes: &[f64],
    ) -> Result<ChartSeries, CoreError> {
        if labels.len() != sizes.len() {
            return Err(CoreError::malformed(format!(
                "composition: {} labels but {} sizes",
                labels.len(),
                sizes.len()
            )));
        }
        let slices = labels
            .iter()
            .zip(sizes)
            .map(|(label, size)| CategorySlice {
                label: label.clone(),
                size: *size,
            })
            .collect();
        Ok(pie(slices))
    }

    pub(crate) fn empty_composition(&self) -> ChartSeries {
        pie(Vec::new())
    }

    // ── Indicators ──────────────────────────────────────────────────

    /// With a `reference` the indicator shows a relative delta against it.
    pub fn build_indicator(&self, value: f64, reference: Option<f64>) -> IndicatorValue {
        IndicatorValue {
            value,
            reference,
            prefix: INDICATOR_PREFIX.to_string(),
            currency_suffix: format!(" {}", self.display_currency),
        }
    }

    /// Wrap an indicator as a renderable number series.
    pub fn indicator_series(&self, name: impl Into<String>, indicator: IndicatorValue) -> ChartSeries {
        ChartSeries::new(
            SeriesKind::Indicator,
            name,
            SeriesData::Indicator(indicator),
            SeriesColor::Auto,
        )
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Price line of a single holding, named after its ticker.
    pub fn build_price_series(
        &self,
        ticker: &str,
        prices: &RawTimeSeries,
        warnings: &mut Vec<PartialDataWarning>,
    ) -> ChartSeries {
        line(
            ticker.to_string(),
            to_point_series_checked(prices, warnings),
            NamedColor::CornflowerBlue,
        )
    }
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new("CAD")
    }
}

fn line(name: String, points: PointSeries, color: NamedColor) -> ChartSeries {
    ChartSeries::new(
        SeriesKind::Line,
        name,
        SeriesData::Points(points),
        SeriesColor::Uniform(color),
    )
}

fn pie(slices: Vec<CategorySlice>) -> ChartSeries {
    ChartSeries::new(
        SeriesKind::Pie,
        "Portfolio Composition",
        SeriesData::Categories(slices),
        SeriesColor::Auto,
    )
}

fn bars(name: String, points: PointSeries, positive: NamedColor, negative: NamedColor) -> ChartSeries {
    let colors = points
        .points()
        .iter()
        .map(|p| if p.value >= 0.0 { positive } else { negative })
        .collect();
    ChartSeries::new(
        SeriesKind::Bar,
        name,
        SeriesData::Points(points),
        SeriesColor::PerPoint(colors),
    )
}
