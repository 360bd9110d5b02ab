//! Inventory error model: domain failures plus file import/export failures.

use thiserror::Error;

use stockroom_core::DomainError;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// Validation, duplicate-key and not-found failures from the domain layer.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The file extension does not name a supported table format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The header row lacks one of the required columns.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A data row (1-based, header excluded) failed validation.
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: DomainError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    #[error("spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook has no worksheet to read from.
    #[error("spreadsheet has no worksheets")]
    EmptyWorkbook,
}

impl InventoryError {
    pub(crate) fn row(row: usize, source: DomainError) -> Self {
        Self::Row { row, source }
    }

    /// The underlying domain error, if this failure is a business-rule one.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            InventoryError::Domain(e) | InventoryError::Row { source: e, .. } => Some(e),
            _ => None,
        }
    }
}
