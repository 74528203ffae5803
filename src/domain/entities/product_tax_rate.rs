//! # Product Tax Rate
//!
//! Association pinning a product to one rate definition of a region. A
//! product may carry several of these, one per applicable rate.

use crate::domain::value_objects::ids::{ProductId, TaxRateId};
use serde::{Deserialize, Serialize};

/// Override linking a product to a region rate definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTaxRate {
    /// The product being overridden.
    pub product_id: ProductId,
    /// The rate definition it is pinned to.
    pub rate_id: TaxRateId,
    /// Free-form metadata carried by the association.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl ProductTaxRate {
    /// Creates an override without metadata.
    #[must_use]
    pub fn new(product_id: ProductId, rate_id: TaxRateId) -> Self {
        Self {
            product_id,
            rate_id,
            metadata: None,
        }
    }

    /// Attaches metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
