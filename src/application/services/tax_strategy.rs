//! # Tax Strategy
//!
//! Pluggable tax calculation.
//!
//! This module provides the [`TaxCalculationStrategy`] trait, the built-in
//! [`SystemTaxStrategy`] and the [`TaxStrategySelector`] seam that decides
//! which strategy handles a region.

use crate::application::error::ApplicationResult;
use crate::domain::entities::region::Region;
use crate::domain::value_objects::calculation::{
    CalculationContext, ProviderTaxLine, TaxCalculationLine,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Trait for tax calculation strategies.
///
/// Implementations turn items paired with their resolved rates into raw
/// tax lines. The returned lines are persisted in the order given.
#[async_trait]
pub trait TaxCalculationStrategy: Send + Sync + fmt::Debug {
    /// Calculates tax lines for the given items.
    ///
    /// # Arguments
    ///
    /// * `lines` - Items with their resolved rates, in item order
    /// * `context` - Shipping address, customer and region of the order
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Strategy` if the calculation fails.
    async fn calculate_line_item_taxes(
        &self,
        lines: &[TaxCalculationLine],
        context: CalculationContext<'_>,
    ) -> ApplicationResult<Vec<ProviderTaxLine>>;

    /// Returns the name of this strategy.
    fn name(&self) -> &'static str;
}

/// Built-in strategy: one tax line per item and applicable rate.
///
/// Rates are applied as resolved. No external provider is consulted and no
/// metadata is attached.
#[derive(Debug, Clone, Default)]
pub struct SystemTaxStrategy;

impl SystemTaxStrategy {
    /// Creates a new system strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaxCalculationStrategy for SystemTaxStrategy {
    async fn calculate_line_item_taxes(
        &self,
        lines: &[TaxCalculationLine],
        _context: CalculationContext<'_>,
    ) -> ApplicationResult<Vec<ProviderTaxLine>> {
        Ok(lines
            .iter()
            .flat_map(|line| {
                line.rates.iter().map(|rate| ProviderTaxLine {
                    item_id: line.item.id().clone(),
                    rate: rate.rate,
                    name: rate.name.clone(),
                    code: rate.code.clone(),
                    metadata: None,
                })
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Chooses the strategy that calculates taxes for a region.
pub trait TaxStrategySelector: Send + Sync + fmt::Debug {
    /// Returns the strategy for `region`.
    fn select(&self, region: &Region) -> Arc<dyn TaxCalculationStrategy>;
}

/// Selector that hands every region the same strategy.
#[derive(Debug, Clone)]
pub struct SingleStrategySelector {
    strategy: Arc<dyn TaxCalculationStrategy>,
}

impl SingleStrategySelector {
    /// Creates a selector that always returns `strategy`.
    #[must_use]
    pub fn new(strategy: Arc<dyn TaxCalculationStrategy>) -> Self {
        Self { strategy }
    }
}

impl Default for SingleStrategySelector {
    fn default() -> Self {
        Self::new(Arc::new(SystemTaxStrategy::new()))
    }
}

impl TaxStrategySelector for SingleStrategySelector {
    fn select(&self, _region: &Region) -> Arc<dyn TaxCalculationStrategy> {
        Arc::clone(&self.strategy)
    }
}
