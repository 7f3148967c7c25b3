use serde::{Deserialize, Serialize};

use super::benchmark::DEFAULT_BENCHMARK;
use crate::errors::CoreError;

/// Dashboard configuration.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Root of the dashboard API, without a trailing slash (one is trimmed anyway).
    pub base_url: String,

    /// Transport-level timeout for a single backend request.
    pub request_timeout_secs: u64,

    /// Currency the backend reports values in; used for labels only.
    pub display_currency: String,

    /// Benchmark ticker selected on mount.
    pub default_benchmark: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
            display_currency: "CAD".to_string(),
            default_benchmark: DEFAULT_BENCHMARK.to_string(),
        }
    }
}

impl DashboardSettings {
    /// Parse settings from JSON, filling in defaults, then validate.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::ValidationError(format!("Invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::ValidationError("base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::ValidationError(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.display_currency.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "display_currency must not be empty".into(),
            ));
        }
        if self.default_benchmark.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "default_benchmark must not be empty".into(),
            ));
        }
        Ok(())
    }
}
