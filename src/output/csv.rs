use anyhow::{Context, Result};
use std::io::Write;

use crate::github::types::PullRequestRecord;

const HEADER: [&str; 4] = ["title", "link", "merged", "updated"];

/// Write the report as CSV. The header row is always emitted, even for an
/// empty report. Lines end with a single newline on every platform.
pub fn write_csv<W: Write>(records: &[PullRequestRecord], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        writer
            .serialize(record)
            .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Render the report to an in-memory string
pub fn render_csv(records: &[PullRequestRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).context("CSV output was not valid UTF-8")
}
