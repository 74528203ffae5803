//! # Taxable Order
//!
//! The order-like aggregate tax lines are computed for. Carts and orders
//! share the same shape as far as tax resolution is concerned, so both are
//! represented by [`TaxableOrder`] tagged with an [`OrderKind`].
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::entities::order::{OrderKind, TaxableOrderBuilder};
//! use tax_provider::domain::entities::region::Region;
//! use tax_provider::domain::value_objects::ids::{OrderId, RegionId};
//! use rust_decimal::Decimal;
//!
//! let region = Region::new(RegionId::new("R1").unwrap(), "EU", Decimal::from(10)).unwrap();
//! let cart = TaxableOrderBuilder::new(OrderId::new("cart_1").unwrap(), OrderKind::Cart, region)
//!     .build();
//!
//! assert!(cart.items().is_empty());
//! ```

use crate::domain::entities::line_item::LineItem;
use crate::domain::entities::region::Region;
use crate::domain::value_objects::ids::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which aggregate the taxable order represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// An open shopping cart.
    Cart,
    /// A placed order.
    Order,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cart => write!(f, "CART"),
            Self::Order => write!(f, "ORDER"),
        }
    }
}

/// Shipping address. Opaque to rate resolution, passed to the strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First address line.
    pub address_1: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Province or state.
    pub province: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
}

/// Customer placing the order. Opaque to rate resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier.
    pub id: CustomerId,
    /// Contact email.
    pub email: Option<String>,
}

/// A cart or order whose items need tax lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableOrder {
    id: OrderId,
    kind: OrderKind,
    region: Region,
    items: Vec<LineItem>,
    shipping_address: Option<Address>,
    customer: Option<Customer>,
}

impl TaxableOrder {
    /// Returns the order ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns whether this is a cart or an order.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Returns the region the order is taxed in.
    #[inline]
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Returns the line items in order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the shipping address, if any.
    #[inline]
    #[must_use]
    pub fn shipping_address(&self) -> Option<&Address> {
        self.shipping_address.as_ref()
    }

    /// Returns the customer, if any.
    #[inline]
    #[must_use]
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }
}

/// Builder for [`TaxableOrder`].
#[derive(Debug, Clone)]
pub struct TaxableOrderBuilder {
    id: OrderId,
    kind: OrderKind,
    region: Region,
    items: Vec<LineItem>,
    shipping_address: Option<Address>,
    customer: Option<Customer>,
}

impl TaxableOrderBuilder {
    /// Creates a builder with the required fields.
    #[must_use]
    pub fn new(id: OrderId, kind: OrderKind, region: Region) -> Self {
        Self {
            id,
            kind,
            region,
            items: Vec::new(),
            shipping_address: None,
            customer: None,
        }
    }

    /// Appends a line item.
    #[must_use]
    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends several line items.
    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Sets the shipping address.
    #[must_use]
    pub fn shipping_address(mut self, address: Address) -> Self {
        self.shipping_address = Some(address);
        self
    }

    /// Sets the customer.
    #[must_use]
    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Builds the order.
    #[must_use]
    pub fn build(self) -> TaxableOrder {
        TaxableOrder {
            id: self.id,
            kind: self.kind,
            region: self.region,
            items: self.items,
            shipping_address: self.shipping_address,
            customer: self.customer,
        }
    }
}
