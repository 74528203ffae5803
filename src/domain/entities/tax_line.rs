//! # Tax Line Entity
//!
//! The persistable record of one rate applied to one line item. Tax lines
//! are created fresh for every computation and never mutated afterwards;
//! there are no setters.
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::entities::tax_line::{TaxLine, TaxLineFields};
//! use tax_provider::domain::value_objects::ids::LineItemId;
//! use rust_decimal::Decimal;
//!
//! let line = TaxLine::create(TaxLineFields {
//!     item_id: LineItemId::new("item_1").unwrap(),
//!     rate: Decimal::from(20),
//!     name: "Standard".to_string(),
//!     code: "STD".to_string(),
//!     metadata: None,
//! });
//!
//! assert_eq!(line.code(), "STD");
//! ```

use crate::domain::value_objects::ids::{LineItemId, TaxLineId};
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field set a tax line is created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLineFields {
    /// Line item the rate applies to.
    pub item_id: LineItemId,
    /// Rate in percent.
    pub rate: Decimal,
    /// Rate name.
    pub name: String,
    /// Rate code.
    pub code: String,
    /// Strategy-provided metadata.
    pub metadata: Option<serde_json::Value>,
}

/// A persistable tax line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    id: TaxLineId,
    item_id: LineItemId,
    rate: Decimal,
    name: String,
    code: String,
    metadata: Option<serde_json::Value>,
    created_at: Timestamp,
}

impl TaxLine {
    /// Creates a new tax line with a fresh ID.
    #[must_use]
    pub fn create(fields: TaxLineFields) -> Self {
        Self {
            id: TaxLineId::new_v4(),
            item_id: fields.item_id,
            rate: fields.rate,
            name: fields.name,
            code: fields.code,
            metadata: fields.metadata,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the tax line ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TaxLineId {
        self.id
    }

    /// Returns the line item the rate applies to.
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &LineItemId {
        &self.item_id
    }

    /// Returns the rate in percent.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the rate name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rate code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the metadata, if any.
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    /// Returns when the record was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl fmt::Display for TaxLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TaxLine({} item={} {}={}%)",
            self.id, self.item_id, self.code, self.rate
        )
    }
}
