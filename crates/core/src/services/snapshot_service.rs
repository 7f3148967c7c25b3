use crate::errors::{CoreError, PartialDataWarning};
use crate::models::ordered_map::OrderedMap;
use crate::models::series::RawTimeSeries;
use crate::models::snapshot::{
    HoldingIndicators, HoldingSnapshot, MultiKeySnapshot, PortfolioIndicators, PortfolioSnapshot,
    RoiSummary,
};
use crate::models::wire::{ComparisonResponse, ComponentList, HoldingResponse, IndivPerfResponse};
use crate::services::overlay_builder::build_overlay_checked;
use crate::services::series_builder::{ComparisonComponents, PnlComponents, SeriesBuilder};

/// Builds whole snapshots out of backend responses.
///
/// Assembly is all-or-nothing: the first shape problem aborts with
/// `MalformedResponse` and nothing is returned. Per-point problems are
/// absorbed and listed in the snapshot's `warnings`.
#[derive(Debug, Clone, Default)]
pub struct SnapshotService {
    builder: SeriesBuilder,
}

impl SnapshotService {
    pub fn new(builder: SeriesBuilder) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &SeriesBuilder {
        &self.builder
    }

    /// Assemble the comparison view for `benchmark` from one response.
    pub fn assemble_snapshot(
        &self,
        benchmark: &str,
        response: &ComparisonResponse,
    ) -> Result<PortfolioSnapshot, CoreError> {
        let investment: ComparisonComponents = response
            .investment_comp
            .decode::<ComponentList>("investment_comp")?
            .into_vec()
            .try_into()?;
        let pnl: PnlComponents = response
            .pnl_data
            .decode::<ComponentList>("pnl_data")?
            .into_vec()
            .try_into()?;

        let composition = self
            .builder
            .build_composition_series(&response.composition.labels, &response.composition.sizes)?;

        let mut warnings = Vec::new();
        let value_series = self
            .builder
            .build_comparison_series_checked(&investment, &mut warnings);
        let pnl_series = self.builder.build_pnl_series_checked(&pnl, &mut warnings);

        let info = &response.info;
        let indicators = PortfolioIndicators {
            cash_invested: self.builder.build_indicator(info.cash_invested, None),
            portfolio_value: self
                .builder
                .build_indicator(info.portfolio_value, Some(info.cash_invested)),
            benchmark_value: self
                .builder
                .build_indicator(info.comp_value, Some(info.cash_invested)),
        };

        let roi = match (info.roi_portfolio, info.roi_comp) {
            (Some(portfolio), Some(benchmark)) => Some(RoiSummary {
                portfolio,
                benchmark,
            }),
            _ => None,
        };

        Ok(PortfolioSnapshot {
            benchmark: benchmark.to_string(),
            value_series,
            pnl_series,
            composition,
            indicators,
            summaries: response.summaries.clone(),
            roi,
            warnings,
        })
    }

    /// Assemble the individual-holdings view. Currency and ticker order
    /// follow the response.
    pub fn assemble_multi_key_snapshot(
        &self,
        response: &IndivPerfResponse,
    ) -> Result<MultiKeySnapshot, CoreError> {
        let mut by_currency = OrderedMap::new();
        let mut warnings = Vec::new();

        for (currency, holdings) in response.0.iter() {
            let mut group = OrderedMap::new();
            for (ticker, holding) in holdings.iter() {
                let snapshot = self.assemble_holding(ticker, holding, &mut warnings)?;
                group.insert(ticker, snapshot);
            }
            by_currency.insert(currency, group);
        }

        Ok(MultiKeySnapshot {
            by_currency,
            warnings,
        })
    }

    fn assemble_holding(
        &self,
        ticker: &str,
        holding: &HoldingResponse,
        warnings: &mut Vec<PartialDataWarning>,
    ) -> Result<HoldingSnapshot, CoreError> {
        let prices: RawTimeSeries = holding.prices.decode(&format!("{ticker}.prices"))?;
        let perf = &holding.performance;
        Ok(HoldingSnapshot {
            indicators: HoldingIndicators {
                invested: self.builder.build_indicator(perf.total_invested, None),
                final_value: self
                    .builder
                    .build_indicator(perf.final_value, Some(perf.total_invested)),
            },
            price_series: self.builder.build_price_series(ticker, &prices, warnings),
            overlay_series: build_overlay_checked(&holding.transactions, warnings),
            roi: perf.roi,
        })
    }
}

impl Default for PortfolioSnapshot {
    /// The "nothing loaded yet" comparison view: every panel empty.
    fn default() -> Self {
        let builder = SeriesBuilder::default();
        let empty = |v: Option<f64>| builder.build_indicator(0.0, v);
        PortfolioSnapshot {
            benchmark: String::new(),
            value_series: builder.build_comparison_series(&ComparisonComponents::default()),
            pnl_series: builder.build_pnl_series(&PnlComponents::default()),
            composition: builder.empty_composition(),
            indicators: PortfolioIndicators {
                cash_invested: empty(None),
                portfolio_value: empty(Some(0.0)),
                benchmark_value: empty(Some(0.0)),
            },
            summaries: Vec::new(),
            roi: None,
            warnings: Vec::new(),
        }
    }
}
