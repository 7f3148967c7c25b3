pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use errors::CoreError;
use models::{
    benchmark::BenchmarkCatalog,
    settings::DashboardSettings,
    snapshot::{MultiKeySnapshot, PortfolioSnapshot},
};
use providers::{http::HttpBackend, traits::DashboardBackend};
use services::{
    fetch_controller::{FetchController, FetchOutcome, FetchState},
    snapshot_source::{ComparisonSource, HoldingsSource},
    store::StoreView,
};

/// Main entry point for the dashboard core, and the context object handed to
/// the rendering surface.
///
/// Owns one controller per view. The rendering surface reads
/// `(snapshot, revision)` pairs from it and calls back into it when the user
/// changes the benchmark or asks for a refresh; it never touches view state
/// directly.
///
/// The async helpers (`mount`, `select_benchmark`, `refresh_*`) hold
/// `&mut self` until their fetch resolves, so through them fetches never
/// overlap. A renderer that must stay responsive while a fetch is in flight
/// uses the ticket API instead: issue with `comparison_controller().select(..)`,
/// run `source().load(..)` off to the side, and hand each result back with
/// `resolve`. Superseded results are then discarded on arrival.
#[must_use]
pub struct PortfolioDashboard {
    settings: DashboardSettings,
    catalog: BenchmarkCatalog,
    comparison: FetchController<ComparisonSource>,
    holdings: FetchController<HoldingsSource>,
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("base_url", &self.settings.base_url)
            .field("benchmark", self.comparison.selection())
            .field("comparison_revision", &self.comparison.revision())
            .field("holdings_revision", &self.holdings.revision())
            .finish()
    }
}

impl PortfolioDashboard {
    /// Dashboard talking to the HTTP backend at `settings.base_url`.
    pub fn new(settings: DashboardSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        let backend: Arc<dyn DashboardBackend> = Arc::new(HttpBackend::new(&settings));
        Self::with_backend(settings, backend)
    }

    /// Dashboard over any backend (fakes in tests, alternative transports).
    pub fn with_backend(
        settings: DashboardSettings,
        backend: Arc<dyn DashboardBackend>,
    ) -> Result<Self, CoreError> {
        Self::with_catalog(settings, backend, BenchmarkCatalog::default())
    }

    pub fn with_catalog(
        settings: DashboardSettings,
        backend: Arc<dyn DashboardBackend>,
        catalog: BenchmarkCatalog,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        tracing::debug!(backend = backend.name(), "creating dashboard");

        let comparison = FetchController::new(
            Arc::new(ComparisonSource::new(
                Arc::clone(&backend),
                settings.display_currency.as_str(),
                catalog.clone(),
            )),
            settings.default_benchmark.clone(),
        );
        let holdings = FetchController::new(
            Arc::new(HoldingsSource::new(backend, settings.display_currency.as_str())),
            (),
        );

        Ok(Self {
            settings,
            catalog,
            comparison,
            holdings,
        })
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Initial load of both views. Returns (comparison, holdings) outcomes.
    pub async fn mount(&mut self) -> (FetchOutcome, FetchOutcome) {
        let ticket = self.comparison.mount();
        let comparison = self.comparison.load(ticket).await;
        let ticket = self.holdings.mount();
        let holdings = self.holdings.load(ticket).await;
        (comparison, holdings)
    }

    // ── Comparison view ─────────────────────────────────────────────

    /// Switch the benchmark and load its data. `None` if it was already selected.
    pub async fn select_benchmark(&mut self, ticker: &str) -> Option<FetchOutcome> {
        self.comparison.change_selection(ticker.to_string()).await
    }

    /// Re-fetch the comparison view for the current benchmark.
    pub async fn refresh_comparison(&mut self) -> FetchOutcome {
        self.comparison.refresh().await
    }

    #[must_use]
    pub fn comparison(&self) -> StoreView<PortfolioSnapshot> {
        self.comparison.current()
    }

    #[must_use]
    pub fn comparison_state(&self) -> &FetchState {
        self.comparison.state()
    }

    #[must_use]
    pub fn selected_benchmark(&self) -> &str {
        self.comparison.selection()
    }

    /// Ticket-level access, for callers that let fetches overlap.
    pub fn comparison_controller(&mut self) -> &mut FetchController<ComparisonSource> {
        &mut self.comparison
    }

    // ── Holdings view ───────────────────────────────────────────────

    pub async fn refresh_holdings(&mut self) -> FetchOutcome {
        self.holdings.refresh().await
    }

    #[must_use]
    pub fn holdings(&self) -> StoreView<MultiKeySnapshot> {
        self.holdings.current()
    }

    #[must_use]
    pub fn holdings_state(&self) -> &FetchState {
        self.holdings.state()
    }

    /// Ticket-level access to the holdings view.
    pub fn holdings_controller(&mut self) -> &mut FetchController<HoldingsSource> {
        &mut self.holdings
    }

    // ── Settings ────────────────────────────────────────────────────

    /// The selectable benchmarks, in menu order.
    #[must_use]
    pub fn benchmarks(&self) -> &BenchmarkCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }
}
