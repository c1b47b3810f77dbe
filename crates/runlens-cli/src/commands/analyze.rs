use crate::OutputFormat;
use anyhow::Result;
use runlens_core::RunAnalyzer;
use runlens_core::analysis::{MetricMap, Summary};
use runlens_core::source::SummaryWriter;
use std::path::{Path, PathBuf};

/// Analyze a run directory and write its summary, returning the summary and
/// the path it was written to.
///
/// A failed write is logged and otherwise ignored; the summary is still
/// returned.
pub fn analyze_run(run_dir: &Path) -> Result<(Summary, PathBuf)> {
    let analyzer = RunAnalyzer::default();
    let summary = analyzer.analyze(run_dir)?;

    let summary_path = analyzer.summary_path(run_dir);
    if let Err(err) = analyzer.write_summary(run_dir, &summary) {
        tracing::warn!("Could not write {}: {}", summary_path.display(), err);
    }

    Ok((summary, summary_path))
}

pub fn execute(run_dir: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Analyzing run directory: {}", run_dir.display());

    let (summary, summary_path) = analyze_run(run_dir)?;

    match format {
        OutputFormat::Json => println!("{}", SummaryWriter::to_string(&summary)?),
        OutputFormat::Pretty => print!("{}", render_digest(&summary, &summary_path)),
    }

    Ok(())
}

/// Human-readable digest of a summary, one fact per line.
pub fn render_digest(summary: &Summary, summary_path: &Path) -> String {
    use console::style;

    let mut lines = vec![style("== Run diagnostic summary ==").bold().cyan().to_string()];

    let gfx = &summary.gfx;
    if gfx.is_empty() {
        lines.push("Jank: no data".to_string());
    } else {
        lines.push(format!(
            "Jank p90/p95/p99: {} / {} / {} ms",
            metric(gfx, "p90_ms"),
            metric(gfx, "p95_ms"),
            metric(gfx, "p99_ms")
        ));
        lines.push(format!(
            "Missed vsync: {}, Slow UI: {}, Frame deadline: {}",
            metric(gfx, "missed_vsync"),
            metric(gfx, "slow_ui_thread"),
            metric(gfx, "frame_deadline_missed")
        ));
        lines.push(format!(
            "GPU p50/p95/p99: {} / {} / {} ms",
            metric(gfx, "gpu_p50_ms"),
            metric(gfx, "gpu_p95_ms"),
            metric(gfx, "gpu_p99_ms")
        ));
    }

    let mem = &summary.memory;
    if mem.is_empty() {
        lines.push("Memory: no data".to_string());
    } else {
        lines.push(format!(
            "MemAvailable: {} kB, SwapFree: {} kB, Cached: {} kB",
            metric(mem, "MemAvailable_kb"),
            metric(mem, "SwapFree_kb"),
            metric(mem, "Cached_kb")
        ));
    }

    let llm = &summary.llm_http;
    let counts = &llm.counts;
    lines.push(format!(
        "LLM HTTP: start={} done={} error={} cancel={} rejected={} empty={}",
        counts.request_start,
        counts.request_done,
        counts.request_error,
        counts.request_cancel,
        counts.request_rejected,
        counts.request_empty
    ));

    if let (Some(p50), Some(p95)) = (llm.total_ms_p50, llm.total_ms_p95) {
        lines.push(format!("LLM lat total p50/p95: {:.0} / {:.0} ms", p50, p95));
    }
    if let (Some(p50), Some(p95)) = (llm.ttfb_ms_p50, llm.ttfb_ms_p95) {
        lines.push(format!("LLM TTFB p50/p95: {:.0} / {:.0} ms", p50, p95));
    }

    lines.push(format!("Summary JSON: {}", summary_path.display()));

    let mut digest = lines.join("\n");
    digest.push('\n');
    digest
}

fn metric(map: &MetricMap, key: &str) -> String {
    map.get(key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string())
}
