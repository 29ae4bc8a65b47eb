//! CSV input and output for code lists.

use super::{normalize_cell, Code};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column that holds the codes, both on input and on output.
pub const CODE_COLUMN: &str = "code";

/// Load codes from the column `column` of the CSV file at `path`.
///
/// Null and empty cells are dropped; everything else is kept in file row
/// order, duplicates included.
pub fn load_codes(path: impl AsRef<Path>, column: &str) -> Result<Vec<Code>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let codes = read_codes(file, column)?;
    log::info!("Loaded {} codes from {}", codes.len(), path.display());
    Ok(codes)
}

/// Read codes from CSV data with a header row.
///
/// Fails with [`Error::Schema`] before reading any records when `column` is
/// not in the header.
pub fn read_codes<R: Read>(reader: R, column: &str) -> Result<Vec<Code>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::Schema {
            column: column.to_string(),
            available: headers.iter().map(str::to_string).collect(),
        })?;

    let mut codes = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = record?;
        match normalize_cell(record.get(index)) {
            Some(code) => codes.push(code),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {} empty or null cells from column '{}'", dropped, column);
    }
    Ok(codes)
}

/// Write `codes` to `path` as a single-column CSV, replacing any existing file.
pub fn persist_codes(codes: &[Code], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_codes(file, codes)?;
    log::info!("Wrote {} codes to {}", codes.len(), path.display());
    Ok(())
}

/// Write `codes` as CSV with the header [`CODE_COLUMN`].
pub fn write_codes<W: Write>(writer: W, codes: &[Code]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([CODE_COLUMN])?;
    for code in codes {
        writer.write_record([code.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
