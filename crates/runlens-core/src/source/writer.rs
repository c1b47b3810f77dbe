use crate::Result;
use crate::analysis::Summary;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct SummaryWriter;

impl SummaryWriter {
    /// Write a summary as indented JSON to a file
    pub fn to_file(summary: &Summary, path: &Path) -> Result<()> {
        tracing::debug!("Writing summary to: {}", path.display());

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.flush()?;

        tracing::info!("Wrote summary to {}", path.display());

        Ok(())
    }

    /// Convert a summary to an indented JSON string
    pub fn to_string(summary: &Summary) -> Result<String> {
        Ok(serde_json::to_string_pretty(summary)?)
    }
}
