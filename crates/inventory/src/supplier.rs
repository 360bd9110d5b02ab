use serde::Serialize;

use stockroom_core::{DomainError, DomainResult, Entity, SupplierId};

/// Supplier reference record.
///
/// Products point at suppliers by [`SupplierId`] only; nothing checks that a
/// matching `Supplier` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supplier {
    supplier_id: SupplierId,
    name: String,
    contact: Option<String>,
}

impl Supplier {
    pub fn new(
        supplier_id: impl Into<SupplierId>,
        name: impl Into<String>,
        contact: Option<String>,
    ) -> DomainResult<Self> {
        let supplier_id = supplier_id.into();
        let name = name.into();
        if supplier_id.is_blank() {
            return Err(DomainError::validation("supplier id cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }
        Ok(Self {
            supplier_id,
            name,
            contact: contact.filter(|c| !c.trim().is_empty()),
        })
    }

    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.supplier_id
    }
}
