use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::benchmark::BenchmarkCatalog;
use crate::models::snapshot::{MultiKeySnapshot, PortfolioSnapshot};
use crate::providers::traits::DashboardBackend;
use crate::services::series_builder::SeriesBuilder;
use crate::services::snapshot_service::SnapshotService;

/// One fetch-and-assemble cycle for a view, keyed by its selection parameter.
///
/// A `FetchController` drives one of these; the controller decides whether
/// the result is still wanted when it arrives.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SnapshotSource: Send + Sync {
    /// What the user selects (benchmark ticker, or `()` for no selection).
    type Param: Clone + PartialEq + Debug + Send + Sync;
    type Snapshot: Default + Send + Sync;

    /// Human-readable name (for logs).
    fn name(&self) -> &str;

    /// Fetch from the backend and assemble a complete snapshot.
    async fn load(&self, param: &Self::Param) -> Result<Self::Snapshot, CoreError>;
}

/// Comparison view: portfolio vs. the selected benchmark.
pub struct ComparisonSource {
    backend: Arc<dyn DashboardBackend>,
    display_currency: String,
    catalog: BenchmarkCatalog,
}

impl ComparisonSource {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        display_currency: impl Into<String>,
        catalog: BenchmarkCatalog,
    ) -> Self {
        Self {
            backend,
            display_currency: display_currency.into(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &BenchmarkCatalog {
        &self.catalog
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SnapshotSource for ComparisonSource {
    type Param = String;
    type Snapshot = PortfolioSnapshot;

    fn name(&self) -> &str {
        "comparison"
    }

    async fn load(&self, benchmark: &String) -> Result<PortfolioSnapshot, CoreError> {
        let response = self.backend.fetch_comparison(benchmark).await?;
        let builder = SeriesBuilder::new(self.display_currency.as_str())
            .with_benchmark_label(self.catalog.label_for(benchmark));
        SnapshotService::new(builder).assemble_snapshot(benchmark, &response)
    }
}

/// Individual-holdings view. Has no selection parameter.
pub struct HoldingsSource {
    backend: Arc<dyn DashboardBackend>,
    service: SnapshotService,
}

impl HoldingsSource {
    pub fn new(backend: Arc<dyn DashboardBackend>, display_currency: impl Into<String>) -> Self {
        Self {
            backend,
            service: SnapshotService::new(SeriesBuilder::new(display_currency)),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SnapshotSource for HoldingsSource {
    type Param = ();
    type Snapshot = MultiKeySnapshot;

    fn name(&self) -> &str {
        "holdings"
    }

    async fn load(&self, _: &()) -> Result<MultiKeySnapshot, CoreError> {
        let response = self.backend.fetch_individual_performance().await?;
        self.service.assemble_multi_key_snapshot(&response)
    }
}
