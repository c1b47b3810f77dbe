//! Run directory analysis: locate the artifacts, extract, aggregate, and
//! assemble the summary record.

use crate::analysis::{EventLogAggregator, Extractor, LLM_HTTP_TAG, MetricTable, Summary};
use crate::source::{SummaryWriter, TextLoader};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Where the artifacts of a run live, in lookup priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    /// Graphics dump candidates; newer capture tools first.
    pub gfx_candidates: Vec<String>,
    /// Memory-info dump candidates.
    pub mem_candidates: Vec<String>,
    /// Filtered system log with the tagged request lines.
    pub event_log: String,
    /// Tag that marks request subsystem lines in `event_log`.
    pub event_tag: String,
    /// Output file name, relative to the run directory.
    pub summary_file: String,
}

impl Default for RunLayout {
    fn default() -> Self {
        Self {
            gfx_candidates: vec![
                "metrics_gfx.txt".to_string(),
                "captura_metrics.log".to_string(),
                "gfxinfo_end.txt".to_string(),
            ],
            mem_candidates: vec![
                "metrics_live.txt".to_string(),
                "meminfo_end.txt".to_string(),
            ],
            event_log: "logcat_llm.txt".to_string(),
            event_tag: LLM_HTTP_TAG.to_string(),
            summary_file: "summary.json".to_string(),
        }
    }
}

pub struct RunAnalyzer {
    layout: RunLayout,
}

impl RunAnalyzer {
    pub fn new(layout: RunLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RunLayout {
        &self.layout
    }

    /// Path the summary is written to for `run_dir`.
    pub fn summary_path(&self, run_dir: &Path) -> PathBuf {
        run_dir.join(&self.layout.summary_file)
    }

    /// Build the summary record for a run directory.
    ///
    /// Missing or unreadable artifacts only leave their section empty; the
    /// directory itself must exist.
    pub fn analyze(&self, run_dir: &Path) -> Result<Summary> {
        if !run_dir.exists() {
            return Err(Error::RunDirNotFound(run_dir.to_path_buf()));
        }

        tracing::debug!("Analyzing run directory: {}", run_dir.display());

        let gfx_text = TextLoader::first_non_empty(run_dir, &self.layout.gfx_candidates[..]);
        let mem_text = TextLoader::first_non_empty(run_dir, &self.layout.mem_candidates[..]);
        let log_text = TextLoader::read_text(&run_dir.join(&self.layout.event_log));

        let gfx = MetricTable::gfx().extract(&gfx_text);
        let memory = MetricTable::meminfo().extract(&mem_text);
        let llm_http = EventLogAggregator::new(self.layout.event_tag.as_str()).extract(&log_text);

        tracing::info!(
            "Run analysis complete: {} gfx metrics, {} memory metrics",
            gfx.len(),
            memory.len()
        );

        Ok(Summary {
            run_dir: run_dir.display().to_string(),
            gfx,
            memory,
            llm_http,
        })
    }

    /// Write the summary into the run directory, returning the path written.
    pub fn write_summary(&self, run_dir: &Path, summary: &Summary) -> Result<PathBuf> {
        let path = self.summary_path(run_dir);
        SummaryWriter::to_file(summary, &path)?;
        Ok(path)
    }
}

impl Default for RunAnalyzer {
    fn default() -> Self {
        Self::new(RunLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EventCounts;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_run_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");

        let result = RunAnalyzer::default().analyze(&missing);
        assert!(matches!(result, Err(Error::RunDirNotFound(_))));
    }

    #[test]
    fn test_empty_run_dir_gives_empty_sections() {
        let dir = TempDir::new().unwrap();
        let summary = RunAnalyzer::default().analyze(dir.path()).unwrap();

        assert!(summary.gfx.is_empty());
        assert!(summary.memory.is_empty());
        assert_eq!(summary.llm_http.counts, EventCounts::default());
        assert!(summary.llm_http.total_ms_p50.is_none());
    }

    #[test]
    fn test_gfx_falls_back_past_empty_primary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("metrics_gfx.txt"), "").unwrap();
        fs::write(dir.path().join("gfxinfo_end.txt"), "95th percentile: 33ms\n").unwrap();

        let summary = RunAnalyzer::default().analyze(dir.path()).unwrap();
        assert_eq!(summary.gfx.get("p95_ms"), Some(&33));
    }

    #[test]
    fn test_gfx_prefers_capture_log_over_end_dump() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("captura_metrics.log"), "95th percentile: 21ms\n").unwrap();
        fs::write(dir.path().join("gfxinfo_end.txt"), "95th percentile: 33ms\n").unwrap();

        let summary = RunAnalyzer::default().analyze(dir.path()).unwrap();
        assert_eq!(summary.gfx.get("p95_ms"), Some(&21));
    }

    #[test]
    fn test_non_empty_primary_wins_even_without_matches() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("metrics_live.txt"), "no meminfo here\n").unwrap();
        fs::write(dir.path().join("meminfo_end.txt"), "MemFree:  10 kB\n").unwrap();

        let summary = RunAnalyzer::default().analyze(dir.path()).unwrap();
        assert!(summary.memory.is_empty());
    }

    #[test]
    fn test_memory_fallback() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("meminfo_end.txt"), "MemFree:  10 kB\n").unwrap();

        let summary = RunAnalyzer::default().analyze(dir.path()).unwrap();
        assert_eq!(summary.memory.get("MemFree_kb"), Some(&10));
    }

    #[test]
    fn test_custom_layout_tag() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("net.log"), "NET request_error totalMs=5\n").unwrap();

        let layout = RunLayout {
            event_log: "net.log".to_string(),
            event_tag: "NET".to_string(),
            ..RunLayout::default()
        };
        let summary = RunAnalyzer::new(layout).analyze(dir.path()).unwrap();

        assert_eq!(summary.llm_http.counts.request_error, 1);
        assert_eq!(summary.llm_http.total_ms_mean, Some(5.0));
    }

    #[test]
    fn test_write_summary_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("metrics_gfx.txt"), "99th percentile: 70ms\n").unwrap();
        let analyzer = RunAnalyzer::default();

        let first = analyzer.analyze(dir.path()).unwrap();
        let path = analyzer.write_summary(dir.path(), &first).unwrap();
        let first_bytes = fs::read(&path).unwrap();

        let second = analyzer.analyze(dir.path()).unwrap();
        analyzer.write_summary(dir.path(), &second).unwrap();

        assert_eq!(path, dir.path().join("summary.json"));
        assert_eq!(first, second);
        assert_eq!(first_bytes, fs::read(&path).unwrap());
    }
}
