//! Flat CSV view of the ledger.

use crate::error::FloodError;
use crate::request::EmergencyRequest;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const DAILY_LOG_HEADER: &str = "ID,Description,Priority";

/// Render the ledger as CSV: header line, then one row per entry.
///
/// Rows are `\n`-terminated except the last, so a non-empty export carries
/// no trailing newline while an empty one is just the header line.
pub fn render_daily_log(entries: &[EmergencyRequest]) -> Result<String, FloodError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(DAILY_LOG_HEADER.split(','))?;
    for entry in entries {
        writer.write_record([
            entry.id.to_string(),
            entry.description.clone(),
            entry.priority.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut rendered = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    if !entries.is_empty() && rendered.ends_with('\n') {
        rendered.pop();
    }
    Ok(rendered)
}
