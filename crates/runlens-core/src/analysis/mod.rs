mod events;
mod patterns;
mod percentile;

pub use events::{EventLogAggregator, LLM_HTTP_TAG};
pub use patterns::{MetricTable, last_match};
pub use percentile::{mean, percentile};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse metric dictionary. A key is present only if its pattern matched;
/// absence means "not found", never zero.
pub type MetricMap = BTreeMap<String, i64>;

/// Root output record for one run directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub run_dir: String,
    pub gfx: MetricMap,
    pub memory: MetricMap,
    pub llm_http: LlmHttpStats,
}

/// Per-kind tallies of request subsystem events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    pub request_start: u64,
    pub request_done: u64,
    pub request_error: u64,
    pub request_cancel: u64,
    pub request_rejected: u64,
    pub request_empty: u64,
}

impl EventCounts {
    /// Bump every counter whose marker occurs in `line`.
    ///
    /// Markers are not mutually exclusive; one line can bump several counters.
    pub fn record(&mut self, line: &str) {
        if line.contains("request_start") {
            self.request_start += 1;
        }
        if line.contains("request_done") {
            self.request_done += 1;
        }
        if line.contains("request_error") {
            self.request_error += 1;
        }
        if line.contains("request_cancel") {
            self.request_cancel += 1;
        }
        if line.contains("request_rejected") {
            self.request_rejected += 1;
        }
        if line.contains("request_empty") {
            self.request_empty += 1;
        }
    }
}

/// Event counters plus latency statistics for the request subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmHttpStats {
    pub counts: EventCounts,
    #[serde(rename = "totalMs_p50")]
    pub total_ms_p50: Option<f64>,
    #[serde(rename = "totalMs_p95")]
    pub total_ms_p95: Option<f64>,
    #[serde(rename = "totalMs_mean")]
    pub total_ms_mean: Option<f64>,
    #[serde(rename = "ttfbMs_p50")]
    pub ttfb_ms_p50: Option<f64>,
    #[serde(rename = "ttfbMs_p95")]
    pub ttfb_ms_p95: Option<f64>,
    #[serde(rename = "ttfbMs_mean")]
    pub ttfb_ms_mean: Option<f64>,
}

pub trait Extractor {
    type Output;

    fn extract(&self, text: &str) -> Self::Output;
}
