//! Inventory domain module.
//!
//! Product catalog keyed by SKU, a parallel supplier registry, snapshot-based
//! undo/redo, and flat-table import/export. Single-threaded and synchronous:
//! every mutation takes `&mut self` and completes before returning.

pub mod error;
pub mod history;
pub mod inventory;
pub mod product;
pub mod supplier;
pub mod table;

pub use error::{InventoryError, InventoryResult};
pub use history::History;
pub use inventory::{Catalog, Inventory, Registry};
pub use product::{CRITICAL_STOCK_THRESHOLD, LOW_STOCK_THRESHOLD, Product, ProductRecord};
pub use supplier::Supplier;
pub use table::TableFormat;

pub use stockroom_core::{DomainError, DomainResult, Entity, Sku, SupplierId};
