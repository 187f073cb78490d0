// 💾 Enriched output writer
// Pipe-delimited: one header line, then one line per record.

use crate::error::Result;
use crate::transaction::EnrichedTransaction;
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the enriched set to `path`, creating parent directories.
///
/// Nothing is written for an empty set.
///
/// # Returns
/// Number of data rows written.
pub fn save_enriched_data(enriched: &[EnrichedTransaction], path: &Path) -> Result<usize> {
    if enriched.is_empty() {
        println!("No enriched data to save.");
        return Ok(0);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .delimiter(b'|')
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(EnrichedTransaction::HEADERS)?;
    for record in enriched {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = enriched.len(), "saved enriched data");
    println!("Enriched data saved to: {}", path.display());

    Ok(enriched.len())
}
