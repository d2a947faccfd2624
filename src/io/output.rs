use std::io::Write;

use anyhow::{Context, Result};

use crate::models::Verdict;

/// Render the verdict as a single-line JSON object
///
/// Non-ASCII speaker ids are written as-is, not `\u` escaped.
pub fn verdict_line(verdict: &Verdict) -> Result<String> {
    serde_json::to_string(verdict).context("Failed to serialize verdict")
}

/// Write the verdict line followed by a newline
pub fn write_verdict<W: Write>(mut writer: W, verdict: &Verdict) -> Result<()> {
    writeln!(writer, "{}", verdict_line(verdict)?).context("Failed to write verdict")?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}
