//! Comma/tab separated tables.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::column_positions;
use crate::error::InventoryResult;
use crate::product::ProductRecord;

pub(super) fn read(path: &Path, delimiter: u8) -> InventoryResult<Vec<ProductRecord>> {
    let mut reader = ReaderBuilder::new().delimiter(delimiter).from_path(path)?;

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let [sku, name, quantity, supplier_id] = column_positions(header.as_slice())?;
    let field = |row: &StringRecord, idx: usize| row.get(idx).unwrap_or_default().to_string();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(ProductRecord {
            sku: field(&row, sku),
            name: field(&row, name),
            quantity: field(&row, quantity),
            supplier_id: field(&row, supplier_id),
        });
    }
    Ok(records)
}

pub(super) fn write(path: &Path, delimiter: u8, records: &[ProductRecord]) -> InventoryResult<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(ProductRecord::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
