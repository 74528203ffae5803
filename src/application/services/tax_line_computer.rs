//! # Tax Line Computer
//!
//! Produces persistable tax lines for a cart or order.
//!
//! Rates for every line item are resolved concurrently. The first failure
//! aborts the computation and nothing is handed to the strategy. Results
//! keep item order regardless of which lookup finishes first.

use crate::application::error::ApplicationResult;
use crate::application::services::rate_resolver::RateResolver;
use crate::application::services::tax_strategy::TaxStrategySelector;
use crate::domain::entities::order::TaxableOrder;
use crate::domain::entities::tax_line::TaxLine;
use crate::domain::value_objects::calculation::{CalculationContext, TaxCalculationLine};
use crate::infrastructure::persistence::TaxLineRepository;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resolves rates per item and runs the selected strategy.
#[derive(Debug, Clone)]
pub struct TaxLineComputer {
    resolver: Arc<RateResolver>,
    selector: Arc<dyn TaxStrategySelector>,
}

impl TaxLineComputer {
    /// Creates a computer.
    #[must_use]
    pub fn new(resolver: Arc<RateResolver>, selector: Arc<dyn TaxStrategySelector>) -> Self {
        Self { resolver, selector }
    }

    /// Returns the rate resolver.
    #[must_use]
    pub fn resolver(&self) -> &Arc<RateResolver> {
        &self.resolver
    }

    /// Returns the strategy selector.
    #[must_use]
    pub fn selector(&self) -> &Arc<dyn TaxStrategySelector> {
        &self.selector
    }

    /// Pairs every item of `order` with its resolved rates, in item order.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub async fn calculation_lines(
        &self,
        order: &TaxableOrder,
    ) -> ApplicationResult<Vec<TaxCalculationLine>> {
        let region = order.region();
        let rate_sets = try_join_all(
            order
                .items()
                .iter()
                .map(|item| self.resolver.resolve(item.product_id(), region)),
        )
        .await?;

        Ok(order
            .items()
            .iter()
            .cloned()
            .zip(rate_sets)
            .map(|(item, rates)| TaxCalculationLine::new(item, rates))
            .collect())
    }

    /// Computes tax lines for `order` and creates them through `tax_lines`.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error, or the strategy error.
    #[instrument(skip_all, fields(order_id = %order.id(), kind = %order.kind(), items = order.items().len()))]
    pub async fn compute_tax_lines(
        &self,
        order: &TaxableOrder,
        tax_lines: &dyn TaxLineRepository,
    ) -> ApplicationResult<Vec<TaxLine>> {
        let lines = self.calculation_lines(order).await?;

        let strategy = self.selector.select(order.region());
        let provider_lines = strategy
            .calculate_line_item_taxes(&lines, CalculationContext::from_order(order))
            .await?;

        debug!(
            strategy = strategy.name(),
            tax_lines = provider_lines.len(),
            "tax lines calculated"
        );

        Ok(provider_lines
            .into_iter()
            .map(|line| tax_lines.create(line.into()))
            .collect())
    }
}
