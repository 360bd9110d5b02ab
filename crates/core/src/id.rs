//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Stock-keeping unit: three uppercase ASCII letters, a hyphen, four digits
/// (`ABC-1234`).
///
/// The only way to obtain a `Sku` is through [`Sku::parse`] (directly or via
/// `FromStr`/`TryFrom`/serde), so every value in circulation is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

/// Supplier reference. Free-form: products may name suppliers that have no
/// record of their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

impl Sku {
    /// Length of a well-formed SKU (`AAA-0000`).
    pub const LEN: usize = 8;

    /// Validate and wrap a SKU string.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if Self::is_well_formed(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::validation(format!(
                "invalid SKU format '{raw}', expected format: ABC-1234"
            )))
        }
    }

    /// Returns `true` if `raw` matches `^[A-Z]{3}-[0-9]{4}$`.
    pub fn is_well_formed(raw: &str) -> bool {
        let bytes = raw.as_bytes();
        bytes.len() == Self::LEN
            && bytes[..3].iter().all(u8::is_ascii_uppercase)
            && bytes[3] == b'-'
            && bytes[4..].iter().all(u8::is_ascii_digit)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SupplierId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl ValueObject for Sku {}
impl ValueObject for SupplierId {}

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        // Lets keyed collections be queried with a plain `&str`.
        impl core::borrow::Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_newtype!(Sku);
impl_string_newtype!(SupplierId);

impl FromStr for Sku {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Sku {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_well_formed(&value) {
            Ok(Self(value))
        } else {
            Self::parse(&value)
        }
    }
}

impl From<&str> for SupplierId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SupplierId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_canonical_sku() {
        let sku = Sku::parse("ABC-1234").unwrap();
        assert_eq!(sku.as_str(), "ABC-1234");
        assert_eq!(sku.to_string(), "ABC-1234");
    }

    #[test]
    fn rejects_lowercase_letters() {
        let err = Sku::parse("abc-1234").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("abc-1234")),
            _ => panic!("Expected Validation error for lowercase SKU"),
        }
    }

    #[test]
    fn rejects_near_misses() {
        for raw in [
            "",
            "AB-1234",
            "ABCD-1234",
            "ABC-123",
            "ABC-12345",
            "ABC_1234",
            "ABC-12a4",
            " ABC-1234",
            "ABC-1234 ",
            "ÄBC-1234",
            "ABC-١٢٣٤",
        ] {
            assert!(Sku::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn serde_rejects_malformed_sku() {
        let ok: Sku = serde_json::from_str("\"XYZ-0001\"").unwrap();
        assert_eq!(ok.as_str(), "XYZ-0001");
        assert!(serde_json::from_str::<Sku>("\"xyz-0001\"").is_err());
    }

    #[test]
    fn supplier_id_is_free_form() {
        let id = SupplierId::from("anything goes");
        assert_eq!(id.as_str(), "anything goes");
        assert!(!id.is_blank());
        assert!(SupplierId::new("  ").is_blank());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: every string matching the pattern is accepted.
        #[test]
        fn well_formed_skus_parse(raw in "[A-Z]{3}-[0-9]{4}") {
            let sku = Sku::parse(&raw).unwrap();
            prop_assert_eq!(sku.as_str(), raw.as_str());
        }

        /// Property: arbitrary strings are accepted exactly when they match the pattern.
        #[test]
        fn parse_agrees_with_pattern(raw in ".{0,12}") {
            let matches = raw.len() == 8
                && raw.chars().take(3).all(|c| c.is_ascii_uppercase())
                && raw.chars().nth(3) == Some('-')
                && raw.chars().skip(4).all(|c| c.is_ascii_digit());
            prop_assert_eq!(Sku::parse(&raw).is_ok(), matches);
        }
    }
}
