//! Flat product tables on disk: CSV/TSV via `csv`, `.xlsx` via `calamine`
//! (read) and `rust_xlsxwriter` (write).
//!
//! This layer only moves [`ProductRecord`]s in and out of files; turning a
//! record into a validated product is the inventory's job.

mod delimited;
mod spreadsheet;

use std::path::Path;

use crate::error::{InventoryError, InventoryResult};
use crate::product::ProductRecord;

/// Table formats, selected by file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl TableFormat {
    pub const ALL: [TableFormat; 3] = [TableFormat::Csv, TableFormat::Tsv, TableFormat::Xlsx];

    /// Pick the format for `path` from its extension (case-insensitive).
    pub fn from_path(path: &Path) -> InventoryResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        Self::ALL
            .into_iter()
            .find(|f| f.extension() == ext)
            .ok_or_else(|| {
                InventoryError::UnsupportedFormat(if ext.is_empty() {
                    format!("{} has no file extension", path.display())
                } else {
                    format!(".{ext} (expected one of .csv, .tsv, .xlsx)")
                })
            })
    }

    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Tsv => "tsv",
            TableFormat::Xlsx => "xlsx",
        }
    }
}

/// Read every data row of the table at `path`.
pub fn read_records(path: &Path, format: TableFormat) -> InventoryResult<Vec<ProductRecord>> {
    match format {
        TableFormat::Csv => delimited::read(path, b','),
        TableFormat::Tsv => delimited::read(path, b'\t'),
        TableFormat::Xlsx => spreadsheet::read(path),
    }
}

/// Write `records` (with header row) to `path`, replacing any existing file.
pub fn write_records(
    path: &Path,
    format: TableFormat,
    records: &[ProductRecord],
) -> InventoryResult<()> {
    match format {
        TableFormat::Csv => delimited::write(path, b',', records),
        TableFormat::Tsv => delimited::write(path, b'\t', records),
        TableFormat::Xlsx => spreadsheet::write(path, records),
    }
}

/// Locate every required column in a header row.
///
/// Returns the column index of each entry of [`ProductRecord::COLUMNS`], in
/// that order. Extra columns are ignored.
fn column_positions<S: AsRef<str>>(header: &[S]) -> InventoryResult<[usize; 4]> {
    let mut positions = [0usize; 4];
    for (slot, column) in positions.iter_mut().zip(ProductRecord::COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h.as_ref().trim() == column)
            .ok_or(InventoryError::MissingColumn(column))?;
    }
    Ok(positions)
}
