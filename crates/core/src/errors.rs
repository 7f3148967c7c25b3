use serde::Serialize;
use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// `Clone` so a controller can keep the last failure around for the
/// rendering surface while the previous snapshot stays on screen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ── Payload shape ───────────────────────────────────────────────
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Shorthand used by the assembly code for shape mismatches.
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CoreError::MalformedResponse(msg.into())
    }
}

/// A non-fatal data problem absorbed while adapting a payload.
///
/// These never abort an assembly; they are collected on the snapshot so the
/// rendering surface can tell that some points were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartialDataWarning {
    /// A time-series key that is not a decimal millisecond timestamp.
    UnparseableTimestamp { key: String },
    /// A time-series entry whose value was null.
    MissingValue { key: String },
    /// Two keys that parse to the same timestamp; `dropped` lost.
    DuplicateTimestamp { kept: String, dropped: String },
    /// A transaction whose date could not be parsed as a calendar date.
    UnparseableTransactionDate { date: String },
}

impl std::fmt::Display for PartialDataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartialDataWarning::UnparseableTimestamp { key } => {
                write!(f, "skipped unparseable timestamp key '{key}'")
            }
            PartialDataWarning::MissingValue { key } => {
                write!(f, "skipped null value at key '{key}'")
            }
            PartialDataWarning::DuplicateTimestamp { kept, dropped } => {
                write!(f, "key '{dropped}' duplicates timestamp of '{kept}'")
            }
            PartialDataWarning::UnparseableTransactionDate { date } => {
                write!(f, "skipped transaction with unparseable date '{date}'")
            }
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::MalformedResponse(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs before they reach logs or the UI.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
