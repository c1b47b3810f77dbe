use super::{EventCounts, Extractor, LlmHttpStats, mean, percentile};
use lazy_static::lazy_static;
use regex::Regex;

/// Log tag carried by every line the request subsystem emits.
pub const LLM_HTTP_TAG: &str = "LLM_HTTP";

lazy_static! {
    static ref TOTAL_MS: Regex = Regex::new(r"totalMs=(\d+)").unwrap();
    // Negative values are "not received yet" sentinels and get filtered.
    static ref TTFB_MS: Regex = Regex::new(r"ttfbMs=(-?\d+)").unwrap();
}

/// Streaming tally of request events in a tagged log.
pub struct EventLogAggregator {
    tag: String,
}

impl EventLogAggregator {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for EventLogAggregator {
    fn default() -> Self {
        Self::new(LLM_HTTP_TAG)
    }
}

impl Extractor for EventLogAggregator {
    type Output = LlmHttpStats;

    fn extract(&self, text: &str) -> LlmHttpStats {
        let mut counts = EventCounts::default();
        let mut totals: Vec<i64> = Vec::new();
        let mut ttfb: Vec<i64> = Vec::new();
        let mut relevant = 0usize;

        for line in text.lines() {
            if !line.contains(self.tag.as_str()) {
                continue;
            }
            relevant += 1;

            counts.record(line);

            if let Some(value) = capture_int(&TOTAL_MS, line) {
                totals.push(value);
            }
            if let Some(value) = capture_int(&TTFB_MS, line)
                && value >= 0
            {
                ttfb.push(value);
            }
        }

        tracing::info!(
            "Event log aggregation complete: {} {} lines, {} total samples, {} ttfb samples",
            relevant,
            self.tag,
            totals.len(),
            ttfb.len()
        );

        LlmHttpStats {
            counts,
            total_ms_p50: percentile(&totals, 50.0),
            total_ms_p95: percentile(&totals, 95.0),
            total_ms_mean: mean(&totals),
            ttfb_ms_p50: percentile(&ttfb, 50.0),
            ttfb_ms_p95: percentile(&ttfb, 95.0),
            ttfb_ms_mean: mean(&ttfb),
        }
    }
}

fn capture_int(regex: &Regex, line: &str) -> Option<i64> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
