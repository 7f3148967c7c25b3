use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::wire::{ComparisonResponse, IndivPerfResponse};

/// The dashboard backend, as the core sees it.
///
/// The HTTP implementation lives in `providers::http`; tests plug in
/// in-memory fakes. Implementations return wire types untouched; turning them
/// into snapshots is the job of `services::snapshot_service`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DashboardBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Portfolio vs. benchmark data for the given benchmark ticker.
    async fn fetch_comparison(&self, benchmark: &str) -> Result<ComparisonResponse, CoreError>;

    /// Per-holding prices, transactions and performance.
    async fn fetch_individual_performance(&self) -> Result<IndivPerfResponse, CoreError>;
}
