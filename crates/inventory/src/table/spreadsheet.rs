//! `.xlsx` workbooks: the first worksheet holds the product table.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Format, Workbook};

use super::column_positions;
use crate::error::{InventoryError, InventoryResult};
use crate::product::ProductRecord;

const SHEET_NAME: &str = "inventory";

/// Integers up to 2^53 survive a round trip through an Excel number cell.
const MAX_EXACT_NUMBER: i64 = 1 << 53;

pub(super) fn read(path: &Path) -> InventoryResult<Vec<ProductRecord>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(InventoryError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(cell_text).collect())
        .unwrap_or_default();
    let [sku, name, quantity, supplier_id] = column_positions(header.as_slice())?;

    let field = |row: &[Data], idx: usize| row.get(idx).map(cell_text).unwrap_or_default();

    Ok(rows
        .filter(|row| !row.iter().all(|c| matches!(c, Data::Empty)))
        .map(|row| ProductRecord {
            sku: field(row, sku),
            name: field(row, name),
            quantity: field(row, quantity),
            supplier_id: field(row, supplier_id),
        })
        .collect())
}

pub(super) fn write(path: &Path, records: &[ProductRecord]) -> InventoryResult<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in (0u16..).zip(ProductRecord::COLUMNS) {
        sheet.write_string_with_format(0, col, column, &bold)?;
    }

    for (row, record) in (1u32..).zip(records) {
        sheet.write_string(row, 0, record.sku.as_str())?;
        sheet.write_string(row, 1, record.name.as_str())?;
        match record.quantity.parse::<i64>() {
            Ok(q) if q.abs() <= MAX_EXACT_NUMBER => {
                sheet.write_number(row, 2, q as f64)?;
            }
            _ => {
                sheet.write_string(row, 2, record.quantity.as_str())?;
            }
        }
        sheet.write_string(row, 3, record.supplier_id.as_str())?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Render a cell as the text a CSV file would hold.
///
/// Whole-number floats print without a fractional part, so a quantity typed
/// as `12` into a spreadsheet reads back as `"12"`, not `"12.0"`. Text cells
/// are kept verbatim.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_NUMBER as f64 => {
            format!("{}", *f as i64)
        }
        other => other.to_string(),
    }
}
