use serde::Serialize;

use stockroom_core::{DomainError, DomainResult, Entity, Sku, SupplierId};

/// Products at or below this quantity are "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Stricter threshold, reserved for escalation (reorder alerts and the like).
pub const CRITICAL_STOCK_THRESHOLD: i64 = 2;

/// A catalog entry: one SKU with its stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    sku: Sku,
    name: String,
    quantity: i64,
    supplier_id: SupplierId,
}

impl Product {
    /// Validate and build a product.
    ///
    /// Fails with [`DomainError::Validation`] when the SKU does not match
    /// `ABC-1234` or the quantity is negative.
    pub fn create(
        sku: &str,
        name: impl Into<String>,
        quantity: i64,
        supplier_id: impl Into<SupplierId>,
    ) -> DomainResult<Self> {
        let sku = Sku::parse(sku)?;
        if quantity < 0 {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative on product creation (got {quantity})"
            )));
        }
        Ok(Self {
            sku,
            name: name.into(),
            quantity,
            supplier_id: supplier_id.into(),
        })
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_THRESHOLD
    }

    pub fn is_critical_stock(&self) -> bool {
        self.quantity <= CRITICAL_STOCK_THRESHOLD
    }

    /// Apply a signed stock delta.
    ///
    /// All-or-nothing: on error the quantity is left as it was.
    pub fn adjust_stock(&mut self, amount: i64) -> DomainResult<()> {
        let next = self.quantity.checked_add(amount).ok_or_else(|| {
            DomainError::validation(format!(
                "stock adjustment of {amount} overflows quantity for product {}",
                self.sku
            ))
        })?;
        if next < 0 {
            return Err(DomainError::validation(format!(
                "cannot reduce stock below zero for product {} (have {}, adjustment {amount})",
                self.sku, self.quantity
            )));
        }
        self.quantity = next;
        Ok(())
    }

    /// Flatten into the text-only row written to tabular files.
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            sku: self.sku.to_string(),
            name: self.name.clone(),
            quantity: self.quantity.to_string(),
            supplier_id: self.supplier_id.to_string(),
        }
    }
}

impl Entity for Product {
    type Id = Sku;

    fn id(&self) -> &Self::Id {
        &self.sku
    }
}

/// Text form of a [`Product`], one field per table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub sku: String,
    pub name: String,
    pub quantity: String,
    pub supplier_id: String,
}

impl ProductRecord {
    /// Column names, in file order.
    pub const COLUMNS: [&'static str; 4] = ["sku", "name", "quantity", "supplier_id"];

    /// Field values in [`Self::COLUMNS`] order.
    pub fn values(&self) -> [&str; 4] {
        [&self.sku, &self.name, &self.quantity, &self.supplier_id]
    }

    /// Parse back into a validated product.
    pub fn into_product(self) -> DomainResult<Product> {
        let quantity: i64 = self.quantity.trim().parse().map_err(|_| {
            DomainError::validation(format!(
                "quantity '{}' is not a whole number",
                self.quantity
            ))
        })?;
        Product::create(&self.sku, self.name, quantity, self.supplier_id)
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        record.into_product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::create("ABC-1234", "Widget", 10, "SUP-1").unwrap()
    }

    #[test]
    fn create_valid_product() {
        let product = widget();
        assert_eq!(product.sku().as_str(), "ABC-1234");
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.quantity(), 10);
        assert_eq!(product.supplier_id().as_str(), "SUP-1");
        assert_eq!(product.id(), product.sku());
    }

    #[test]
    fn create_rejects_lowercase_sku() {
        let err = Product::create("abc-1234", "Widget", 10, "SUP-1").unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for lowercase SKU"),
        }
    }

    #[test]
    fn create_rejects_negative_quantity() {
        let err = Product::create("ABC-1234", "Widget", -1, "SUP-1").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("negative")),
            _ => panic!("Expected Validation error for negative quantity"),
        }
    }

    #[test]
    fn create_accepts_zero_quantity() {
        let product = Product::create("ABC-1234", "Widget", 0, "SUP-1").unwrap();
        assert_eq!(product.quantity(), 0);
    }

    #[test]
    fn adjust_stock_applies_delta_exactly() {
        let mut product = widget();
        product.adjust_stock(5).unwrap();
        assert_eq!(product.quantity(), 15);
        product.adjust_stock(-15).unwrap();
        assert_eq!(product.quantity(), 0);
    }

    #[test]
    fn adjust_stock_below_zero_is_rejected_and_leaves_quantity() {
        let mut product = widget();
        let err = product.adjust_stock(-15).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("below zero")),
            _ => panic!("Expected Validation error for negative stock"),
        }
        assert_eq!(product.quantity(), 10);
    }

    #[test]
    fn adjust_stock_overflow_is_rejected() {
        let mut product = widget();
        assert!(product.adjust_stock(i64::MAX).is_err());
        assert_eq!(product.quantity(), 10);
    }

    #[test]
    fn stock_level_flags() {
        let mut product = Product::create("ABC-1234", "Widget", 6, "SUP-1").unwrap();
        assert!(!product.is_low_stock());
        product.adjust_stock(-1).unwrap();
        assert!(product.is_low_stock());
        assert!(!product.is_critical_stock());
        product.adjust_stock(-3).unwrap();
        assert!(product.is_critical_stock());
    }

    #[test]
    fn to_record_renders_quantity_as_text() {
        let record = widget().to_record();
        assert_eq!(record.values(), ["ABC-1234", "Widget", "10", "SUP-1"]);
    }

    #[test]
    fn record_parses_back_into_product() {
        let record = widget().to_record();
        assert_eq!(Product::try_from(record).unwrap(), widget());
    }

    #[test]
    fn record_with_non_numeric_quantity_is_rejected() {
        let record = ProductRecord {
            sku: "ABC-1234".to_string(),
            name: "Widget".to_string(),
            quantity: "ten".to_string(),
            supplier_id: "SUP-1".to_string(),
        };
        match record.into_product().unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("ten")),
            _ => panic!("Expected Validation error for non-numeric quantity"),
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: adjusting by `a` then `-a` restores the original quantity.
            #[test]
            fn adjust_then_reverse_restores_quantity(
                start in 0i64..1_000_000,
                amount in -1_000_000i64..1_000_000
            ) {
                let mut product = Product::create("ABC-1234", "Widget", start, "SUP-1").unwrap();
                prop_assume!(start + amount >= 0);

                product.adjust_stock(amount).unwrap();
                product.adjust_stock(-amount).unwrap();
                prop_assert_eq!(product.quantity(), start);
            }

            /// Property: an adjustment either applies exactly or changes nothing.
            #[test]
            fn adjust_is_all_or_nothing(
                start in 0i64..1_000,
                amount in -2_000i64..2_000
            ) {
                let mut product = Product::create("ABC-1234", "Widget", start, "SUP-1").unwrap();
                match product.adjust_stock(amount) {
                    Ok(()) => prop_assert_eq!(product.quantity(), start + amount),
                    Err(_) => {
                        prop_assert!(start + amount < 0);
                        prop_assert_eq!(product.quantity(), start);
                    }
                }
            }
        }
    }
}
