//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`RegionId`], [`ProductId`], [`TaxRateId`], [`LineItemId`]: validated
//!   string identifiers that never contain the key delimiter
//! - [`TaxLineId`]: UUID-based identifier for persisted tax lines
//!
//! ## Rates
//!
//! - [`TaxServiceRate`]: one `(rate, name, code)` triple
//! - [`RateSet`]: ordered, non-empty rates for one product in one region
//!
//! ## Calculation
//!
//! - [`TaxCalculationLine`], [`CalculationContext`], [`ProviderTaxLine`]:
//!   strategy input and output shapes

pub mod calculation;
pub mod ids;
pub mod tax_rate;
pub mod timestamp;

pub use calculation::{CalculationContext, ProviderTaxLine, TaxCalculationLine};
pub use ids::{
    CustomerId, ID_DELIMITER, LineItemId, OrderId, ProductId, RegionId, TaxLineId, TaxRateId,
    VariantId,
};
pub use tax_rate::{DEFAULT_RATE_CODE, DEFAULT_RATE_NAME, RateSet, TaxServiceRate};
pub use timestamp::Timestamp;
