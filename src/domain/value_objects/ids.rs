//! # Identifiers
//!
//! Validated string identifiers for regions, products and related records,
//! plus the UUID-based [`TaxLineId`].
//!
//! String identifiers are non-empty, contain no whitespace and never contain
//! [`ID_DELIMITER`], which keeps composite keys built from them unambiguous.
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::value_objects::ids::{ProductId, RegionId};
//!
//! let product = ProductId::new("prod_01").unwrap();
//! assert_eq!(product.as_str(), "prod_01");
//!
//! assert!(RegionId::new("reg:01").is_err());
//! assert!(RegionId::new("").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Character reserved for joining identifiers into composite keys.
pub const ID_DELIMITER: char = ':';

fn validate(kind: &'static str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::invalid_identifier(kind, "must not be empty"));
    }
    if value.contains(ID_DELIMITER) {
        return Err(DomainError::invalid_identifier(
            kind,
            format!("must not contain '{ID_DELIMITER}'"),
        ));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(DomainError::invalid_identifier(
            kind,
            "must not contain whitespace",
        ));
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::InvalidIdentifier` if the value is empty,
            /// contains whitespace or contains the key delimiter.
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                let value = value.into();
                validate(stringify!($name), &value)?;
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> DomainResult<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a tax region.
    RegionId
);

string_id!(
    /// Identifier of a product.
    ProductId
);

string_id!(
    /// Identifier of a product variant.
    VariantId
);

string_id!(
    /// Identifier of a tax rate definition within a region.
    TaxRateId
);

string_id!(
    /// Identifier of an order line item.
    LineItemId
);

string_id!(
    /// Identifier of a cart or order.
    OrderId
);

string_id!(
    /// Identifier of a customer.
    CustomerId
);

/// Identifier of a persisted tax line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxLineId(Uuid);

impl TaxLineId {
    /// Creates a new random tax line ID.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn get(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TaxLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
