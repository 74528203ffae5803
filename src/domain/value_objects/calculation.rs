//! # Calculation Shapes
//!
//! Values exchanged with tax calculation strategies: the per-item input
//! ([`TaxCalculationLine`]), the order context ([`CalculationContext`]) and
//! the raw output ([`ProviderTaxLine`]). None of them outlive a single
//! computation.

use crate::domain::entities::line_item::LineItem;
use crate::domain::entities::order::{Address, Customer, TaxableOrder};
use crate::domain::entities::region::Region;
use crate::domain::entities::tax_line::TaxLineFields;
use crate::domain::value_objects::ids::LineItemId;
use crate::domain::value_objects::tax_rate::RateSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line item paired with the rates resolved for its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxCalculationLine {
    /// The line item.
    pub item: LineItem,
    /// Rates applicable to the item's product.
    pub rates: RateSet,
}

impl TaxCalculationLine {
    /// Pairs an item with its rates.
    #[must_use]
    pub fn new(item: LineItem, rates: RateSet) -> Self {
        Self { item, rates }
    }
}

/// Order-level data handed to the strategy alongside the calculation lines.
#[derive(Debug, Clone, Copy)]
pub struct CalculationContext<'a> {
    /// Where the order ships to.
    pub shipping_address: Option<&'a Address>,
    /// Who placed the order.
    pub customer: Option<&'a Customer>,
    /// The region the order is taxed in.
    pub region: &'a Region,
}

impl<'a> CalculationContext<'a> {
    /// Borrows the context out of an order.
    #[must_use]
    pub fn from_order(order: &'a TaxableOrder) -> Self {
        Self {
            shipping_address: order.shipping_address(),
            customer: order.customer(),
            region: order.region(),
        }
    }
}

/// A raw tax line as returned by a calculation strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTaxLine {
    /// Line item the rate applies to.
    pub item_id: LineItemId,
    /// Rate in percent.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub rate: Decimal,
    /// Rate name.
    pub name: String,
    /// Rate code.
    pub code: String,
    /// Strategy-specific metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl From<ProviderTaxLine> for TaxLineFields {
    fn from(line: ProviderTaxLine) -> Self {
        Self {
            item_id: line.item_id,
            rate: line.rate,
            name: line.name,
            code: line.code,
            metadata: line.metadata,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::order::{OrderKind, TaxableOrderBuilder};
    use crate::domain::value_objects::ids::{OrderId, RegionId};

    #[test]
    fn provider_line_converts_verbatim() {
        let line = ProviderTaxLine {
            item_id: LineItemId::new("item_1").unwrap(),
            rate: Decimal::new(75, 1),
            name: "Reduced".to_string(),
            code: "RED".to_string(),
            metadata: Some(serde_json::json!({"k": 1})),
        };
        let fields: TaxLineFields = line.clone().into();
        assert_eq!(fields.item_id, line.item_id);
        assert_eq!(fields.rate, Decimal::new(75, 1));
        assert_eq!(fields.code, "RED");
        assert_eq!(fields.metadata, line.metadata);
    }

    #[test]
    fn context_borrows_order() {
        let region = Region::new(RegionId::new("R1").unwrap(), "EU", Decimal::from(10)).unwrap();
        let order =
            TaxableOrderBuilder::new(OrderId::new("o1").unwrap(), OrderKind::Order, region).build();
        let ctx = CalculationContext::from_order(&order);
        assert_eq!(ctx.region.id().as_str(), "R1");
        assert!(ctx.customer.is_none());
    }
}
