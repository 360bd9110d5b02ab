//! Text rendering: product tables and user-facing error messages.

use std::fmt::Write as _;

use stockroom_inventory::{DomainError, InventoryError, Product};

const HEADERS: [&str; 4] = ["SKU", "Name", "Quantity", "Supplier ID"];

/// Render products as an aligned table. Low-stock quantities carry a `(low)` flag.
pub fn product_table(products: &[&Product]) -> String {
    let rows: Vec<[String; 4]> = products
        .iter()
        .map(|p| {
            let quantity = if p.is_low_stock() {
                format!("{} (low)", p.quantity())
            } else {
                p.quantity().to_string()
            };
            [
                p.sku().to_string(),
                p.name().to_string(),
                quantity,
                p.supplier_id().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, HEADERS);
    for row in &rows {
        push_row(&mut out, &widths, row.each_ref().map(String::as_str));
    }
    if rows.is_empty() {
        out.push_str("(no products)\n");
    }
    out
}

fn push_row(out: &mut String, widths: &[usize; 4], cells: [&str; 4]) {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// One distinct, human-readable message per failure kind.
pub fn describe_error(err: &InventoryError) -> String {
    match err {
        InventoryError::Domain(e) => describe_domain(e),
        InventoryError::Row { row, source } => {
            format!("Load failed at row {row}: {}", describe_domain(source))
        }
        InventoryError::UnsupportedFormat(detail) => format!("Unsupported file format: {detail}"),
        InventoryError::MissingColumn(column) => {
            format!("Load failed: the table has no '{column}' column")
        }
        InventoryError::EmptyWorkbook => "Load failed: the workbook has no worksheets".to_string(),
        other => format!("File error: {other}"),
    }
}

pub fn describe_domain(err: &DomainError) -> String {
    match err {
        DomainError::Validation(msg) => format!("Invalid input: {msg}"),
        DomainError::DuplicateKey(msg) => format!("Already exists: {msg}"),
        DomainError::NotFound(msg) => format!("Not found: {msg}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_flags_low_stock_and_aligns_columns() {
        let widget = Product::create("ABC-1234", "Widget", 10, "SUP-1").unwrap();
        let gizmo = Product::create("XYZ-0001", "Gizmo deluxe", 5, "SUP-22").unwrap();
        let table = product_table(&[&widget, &gizmo]);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SKU       Name          Quantity  Supplier ID"));
        assert!(lines[1].contains("10 "));
        assert!(!lines[1].contains("(low)"));
        assert!(lines[2].contains("5 (low)"));
        assert!(lines[2].ends_with("SUP-22"));
    }

    #[test]
    fn empty_table_says_so() {
        let table = product_table(&[]);
        assert!(table.ends_with("(no products)\n"));
    }

    #[test]
    fn each_error_kind_reads_differently() {
        let messages = [
            describe_error(&DomainError::validation("bad").into()),
            describe_error(&DomainError::duplicate_key("ABC-1234").into()),
            describe_error(&DomainError::not_found("ABC-1234").into()),
            describe_error(&InventoryError::UnsupportedFormat(".json".to_string())),
        ];
        assert!(messages[0].starts_with("Invalid input"));
        assert!(messages[1].starts_with("Already exists"));
        assert!(messages[2].starts_with("Not found"));
        assert!(messages[3].starts_with("Unsupported file format"));
    }
}
