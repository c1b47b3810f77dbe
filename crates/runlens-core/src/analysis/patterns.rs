use super::{Extractor, MetricMap};
use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

const GFX_PATTERNS: &[(&str, &str)] = &[
    ("p90_ms", r"90th percentile: (\d+)ms"),
    ("p95_ms", r"95th percentile: (\d+)ms"),
    ("p99_ms", r"99th percentile: (\d+)ms"),
    ("missed_vsync", r"Number Missed Vsync: (\d+)"),
    ("high_input_latency", r"Number High input latency: (\d+)"),
    ("slow_ui_thread", r"Number Slow UI thread: (\d+)"),
    ("slow_bitmap", r"Number Slow bitmap uploads: (\d+)"),
    ("slow_issue_draw", r"Number Slow issue draw commands: (\d+)"),
    ("frame_deadline_missed", r"Number Frame deadline missed: (\d+)"),
    (
        "frame_deadline_missed_legacy",
        r"Number Frame deadline missed \(legacy\): (\d+)",
    ),
    ("gpu_p50_ms", r"50th gpu percentile: (\d+)ms"),
    ("gpu_p90_ms", r"90th gpu percentile: (\d+)ms"),
    ("gpu_p95_ms", r"95th gpu percentile: (\d+)ms"),
    ("gpu_p99_ms", r"99th gpu percentile: (\d+)ms"),
];

// `\b` keeps `Cached:` from matching inside `SwapCached:`.
const MEMINFO_PATTERNS: &[(&str, &str)] = &[
    ("MemAvailable_kb", r"\bMemAvailable:\s+(\d+) kB"),
    ("MemFree_kb", r"\bMemFree:\s+(\d+) kB"),
    ("Cached_kb", r"\bCached:\s+(\d+) kB"),
    ("SwapFree_kb", r"\bSwapFree:\s+(\d+) kB"),
    ("SwapTotal_kb", r"\bSwapTotal:\s+(\d+) kB"),
    ("AnonPages_kb", r"\bAnonPages:\s+(\d+) kB"),
    ("PageTables_kb", r"\bPageTables:\s+(\d+) kB"),
];

lazy_static! {
    static ref GFX_TABLE: MetricTable = MetricTable::new(GFX_PATTERNS).unwrap();
    static ref MEMINFO_TABLE: MetricTable = MetricTable::new(MEMINFO_PATTERNS).unwrap();
}

/// Named single-capture patterns, each extracted independently.
#[derive(Debug, Clone)]
pub struct MetricTable {
    entries: Vec<(String, Regex)>,
}

impl MetricTable {
    /// Compile a table from `(metric name, pattern)` pairs.
    ///
    /// Patterns run in multi-line mode and must have exactly one capture group.
    pub fn new(specs: &[(&str, &str)]) -> Result<Self> {
        let mut entries = Vec::with_capacity(specs.len());

        for (key, pattern) in specs {
            let regex = RegexBuilder::new(pattern)
                .multi_line(true)
                .build()
                .map_err(|e| Error::Pattern {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;

            // captures_len counts the implicit whole-match group
            if regex.captures_len() != 2 {
                return Err(Error::Pattern {
                    key: key.to_string(),
                    reason: format!(
                        "expected exactly one capture group, found {}",
                        regex.captures_len() - 1
                    ),
                });
            }

            entries.push((key.to_string(), regex));
        }

        Ok(Self { entries })
    }

    /// Graphics jank/frame timing table for `dumpsys gfxinfo` style dumps.
    pub fn gfx() -> &'static MetricTable {
        &GFX_TABLE
    }

    /// Memory table for `/proc/meminfo` style dumps.
    pub fn meminfo() -> &'static MetricTable {
        &MEMINFO_TABLE
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extractor for MetricTable {
    type Output = MetricMap;

    fn extract(&self, text: &str) -> MetricMap {
        let mut metrics = MetricMap::new();

        for (key, regex) in &self.entries {
            let Some(raw) = last_match(text, regex) else {
                continue;
            };
            match raw.parse::<i64>() {
                Ok(value) => {
                    metrics.insert(key.clone(), value);
                }
                Err(err) => {
                    tracing::debug!("Dropping non-numeric capture for {}: {:?} ({})", key, raw, err);
                }
            }
        }

        tracing::debug!(
            "Extracted {} of {} metrics",
            metrics.len(),
            self.entries.len()
        );

        metrics
    }
}

/// Capture group of the last match of `regex` in `text`.
///
/// Dumps repeat running counters over a capture session, so the final
/// occurrence is the one that counts.
pub fn last_match<'t>(text: &'t str, regex: &Regex) -> Option<&'t str> {
    regex
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
