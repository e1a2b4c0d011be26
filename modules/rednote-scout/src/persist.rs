//! Output files: the per-topic CSV table and the final result text.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rednote_common::{PostRecord, ScrapeRequest};
use tracing::info;

/// Lets spreadsheet tools detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn csv_path(output_dir: &Path, request: &ScrapeRequest) -> PathBuf {
    output_dir.join(format!("scraped_data_{}.csv", request.file_stem()))
}

pub fn result_path(output_dir: &Path, request: &ScrapeRequest) -> PathBuf {
    output_dir.join(format!("result_{}.txt", request.file_stem()))
}

/// Header `post_number,url,title,image_url,comments`, one row per record,
/// overwriting any previous file for the same topic.
pub fn write_csv(path: &Path, records: &[PostRecord]) -> Result<()> {
    ensure_parent(path)?;

    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write row {}", record.post_number))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "CSV written");
    Ok(())
}

/// `Topic: <topic>`, a rule of 60 `=`, a blank line, then `content`.
pub fn write_result(output_dir: &Path, request: &ScrapeRequest, content: &str) -> Result<PathBuf> {
    let path = result_path(output_dir, request);
    ensure_parent(&path)?;

    let body = format!("Topic: {}\n{}\n\n{}", request.topic(), "=".repeat(60), content);
    fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "Result file written");
    Ok(path)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
