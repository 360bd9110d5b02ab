//! Entity trait: identity + continuity across state changes.

use crate::value_object::ValueObject;

/// Entity marker + minimal interface.
///
/// Collections keyed by entity identity (the product catalog, the supplier
/// registry) rely on `id()` staying stable for the lifetime of the value.
pub trait Entity {
    /// Strongly-typed entity identifier; a value object usable as a map key.
    type Id: ValueObject + Eq + core::hash::Hash + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
