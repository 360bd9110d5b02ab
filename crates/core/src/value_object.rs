//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two SKUs with the
/// same text are the same SKU. To "modify" one, build a new one.
///
/// ```ignore
/// let a = Sku::parse("ABC-1234")?;
/// let b = Sku::parse("ABC-1234")?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
