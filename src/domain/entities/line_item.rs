//! # Line Item Entity
//!
//! A line of a cart or order. Only the product reference matters for rate
//! resolution; price and quantity are carried through to the calculation
//! strategy untouched.

use crate::domain::value_objects::ids::{LineItemId, ProductId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The variant a line item was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant identifier.
    pub id: VariantId,
    /// Owning product identifier.
    pub product_id: ProductId,
}

impl ProductVariant {
    /// Creates a new variant reference.
    #[must_use]
    pub fn new(id: VariantId, product_id: ProductId) -> Self {
        Self { id, product_id }
    }
}

/// A line item of a cart or order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineItemId,
    title: String,
    variant: ProductVariant,
    unit_price: Decimal,
    quantity: u32,
}

impl LineItem {
    /// Creates a new line item.
    #[must_use]
    pub fn new(
        id: LineItemId,
        title: impl Into<String>,
        variant: ProductVariant,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            variant,
            unit_price,
            quantity,
        }
    }

    /// Returns the line item ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &LineItemId {
        &self.id
    }

    /// Returns the title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the variant reference.
    #[inline]
    #[must_use]
    pub fn variant(&self) -> &ProductVariant {
        &self.variant
    }

    /// Returns the product this item was sold from.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.variant.product_id
    }

    /// Returns the unit price.
    #[inline]
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Returns the quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
