use serde::{Deserialize, Serialize};

/// Ticker used when nothing has been selected yet.
pub const DEFAULT_BENCHMARK: &str = "^IXIC";

/// Label for tickers that are not in the catalogue.
pub const FALLBACK_LABEL: &str = "Comparison";

/// A market index the portfolio can be compared against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Display name, e.g. "NASDAQ"
    pub name: String,
    /// Backend ticker, e.g. "^IXIC"
    pub ticker: String,
}

impl Benchmark {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }
}

/// The selectable benchmarks, in menu order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkCatalog {
    pub benchmarks: Vec<Benchmark>,
}

impl BenchmarkCatalog {
    pub fn new(benchmarks: Vec<Benchmark>) -> Self {
        Self { benchmarks }
    }

    pub fn find(&self, ticker: &str) -> Option<&Benchmark> {
        self.benchmarks.iter().find(|b| b.ticker == ticker)
    }

    /// Display label for a ticker; unknown tickers get [`FALLBACK_LABEL`].
    pub fn label_for(&self, ticker: &str) -> &str {
        self.find(ticker)
            .map(|b| b.name.as_str())
            .unwrap_or(FALLBACK_LABEL)
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.find(ticker).is_some()
    }
}

impl Default for BenchmarkCatalog {
    fn default() -> Self {
        Self::new(vec![
            Benchmark::new("NASDAQ", "^IXIC"),
            Benchmark::new("S&P 500", "^GSPC"),
            Benchmark::new("Dow Jones", "^DJI"),
            Benchmark::new("TSX Composite", "^GSPTSE"),
            Benchmark::new("FTSE 100", "^FTSE"),
        ])
    }
}
