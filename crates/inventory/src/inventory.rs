use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Entry;

use stockroom_core::{DomainError, DomainResult, Entity};

use crate::error::{InventoryError, InventoryResult};
use crate::history::History;
use crate::product::{Product, ProductRecord};
use crate::supplier::Supplier;
use crate::table::{self, TableFormat};

/// Entities keyed by their own id, iterated in insertion order.
pub type Registry<E> = IndexMap<<E as Entity>::Id, E>;

/// Product collection keyed by SKU, iterated in insertion order.
pub type Catalog = Registry<Product>;

/// The product catalog plus its supplier registry and undo/redo history.
///
/// Invariants:
/// - every catalog key equals the `sku` of its product;
/// - with history enabled, the live catalog always equals the snapshot under
///   the history cursor.
#[derive(Debug, Clone)]
pub struct Inventory {
    products: Catalog,
    suppliers: Registry<Supplier>,
    history: Option<History<Catalog>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Empty inventory with undo/redo enabled.
    pub fn new() -> Self {
        Self {
            products: Catalog::new(),
            suppliers: Registry::new(),
            history: Some(History::new(Catalog::new())),
        }
    }

    /// Empty inventory that records no snapshots; `undo`/`redo` are no-ops.
    pub fn without_history() -> Self {
        Self {
            products: Catalog::new(),
            suppliers: Registry::new(),
            history: None,
        }
    }

    pub fn history_enabled(&self) -> bool {
        self.history.is_some()
    }

    pub fn history(&self) -> Option<&History<Catalog>> {
        self.history.as_ref()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn product(&self, sku: &str) -> Option<&Product> {
        self.products.get(sku)
    }

    /// Insert a new product. Fails if the SKU is already present.
    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        let (sku, quantity) = (product.sku().clone(), product.quantity());
        insert_new(&mut self.products, product).map_err(|_| {
            DomainError::duplicate_key(format!("product with SKU {sku} already exists"))
        })?;
        tracing::debug!(%sku, quantity, "product added");
        self.record_snapshot();
        Ok(())
    }

    /// Apply a signed stock delta to one product.
    pub fn adjust_product_stock(&mut self, sku: &str, amount: i64) -> DomainResult<()> {
        let product = self
            .products
            .get_mut(sku)
            .ok_or_else(|| DomainError::not_found(format!("no product with SKU {sku}")))?;
        product.adjust_stock(amount)?;
        tracing::debug!(sku, amount, quantity = product.quantity(), "stock adjusted");
        self.record_snapshot();
        Ok(())
    }

    /// Remove a product, keeping the order of the others. Returns the removed product.
    pub fn delete_product(&mut self, sku: &str) -> DomainResult<Product> {
        let product = self
            .products
            .shift_remove(sku)
            .ok_or_else(|| DomainError::not_found(format!("no product with SKU {sku}")))?;
        tracing::debug!(sku, "product deleted");
        self.record_snapshot();
        Ok(product)
    }

    /// Every product, in insertion order.
    pub fn list_all_products(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Products at or below [`crate::LOW_STOCK_THRESHOLD`], in insertion order.
    pub fn get_low_stock_products(&self) -> Vec<&Product> {
        self.products.values().filter(|p| p.is_low_stock()).collect()
    }

    /// Register a supplier. Suppliers are not part of undo/redo or file I/O.
    pub fn add_supplier(&mut self, supplier: Supplier) -> DomainResult<()> {
        insert_new(&mut self.suppliers, supplier).map_err(|rejected| {
            DomainError::duplicate_key(format!("supplier {} already exists", rejected.id()))
        })
    }

    pub fn supplier(&self, supplier_id: &str) -> Option<&Supplier> {
        self.suppliers.get(supplier_id)
    }

    pub fn list_suppliers(&self) -> Vec<&Supplier> {
        self.suppliers.values().collect()
    }

    /// Replace the whole catalog with the table at `path`.
    ///
    /// All-or-nothing: rows are validated into a fresh catalog that replaces
    /// the live one only once every row has passed. On error the inventory
    /// (including its history) is unchanged. On success the history restarts
    /// from the loaded catalog. Returns the number of products loaded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> InventoryResult<usize> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)?;

        let catalog = table::read_records(path, format)
            .and_then(catalog_from_records)
            .inspect_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "inventory load rejected");
            })?;

        let count = catalog.len();
        self.products = catalog;
        if let Some(history) = self.history.as_mut() {
            history.reset(self.products.clone());
        }
        tracing::info!(path = %path.display(), products = count, "inventory loaded");
        Ok(count)
    }

    /// Write the catalog to `path` in insertion order. In-memory state is untouched.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> InventoryResult<()> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)?;
        let records: Vec<ProductRecord> = self.products.values().map(Product::to_record).collect();
        table::write_records(path, format, &records)?;
        tracing::info!(path = %path.display(), products = records.len(), "inventory saved");
        Ok(())
    }

    /// Restore the previous snapshot. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.as_mut().and_then(History::undo) else {
            return false;
        };
        self.products = Catalog::clone(&snapshot);
        true
    }

    /// Re-apply the next snapshot. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.as_mut().and_then(History::redo) else {
            return false;
        };
        self.products = Catalog::clone(&snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(History::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(History::can_redo)
    }

    fn record_snapshot(&mut self) {
        if let Some(history) = self.history.as_mut() {
            history.push(self.products.clone());
        }
    }
}

/// Insert `entity` under its own id unless that id is taken; a rejected
/// entity is handed back untouched.
fn insert_new<E: Entity>(registry: &mut Registry<E>, entity: E) -> Result<(), E> {
    match registry.entry(entity.id().clone()) {
        Entry::Occupied(_) => Err(entity),
        Entry::Vacant(slot) => {
            slot.insert(entity);
            Ok(())
        }
    }
}

/// Validate every record into a new catalog, naming the first bad row.
fn catalog_from_records(records: Vec<ProductRecord>) -> InventoryResult<Catalog> {
    let mut catalog = Catalog::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        let row = idx + 1;
        let product = record
            .into_product()
            .map_err(|e| InventoryError::row(row, e))?;
        insert_new(&mut catalog, product).map_err(|rejected| {
            InventoryError::row(
                row,
                DomainError::duplicate_key(format!("SKU {} appears more than once", rejected.id())),
            )
        })?;
    }
    Ok(catalog)
}
