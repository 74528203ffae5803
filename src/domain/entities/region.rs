//! # Region Entity
//!
//! A tax jurisdiction with a default rate and an ordered set of named rate
//! definitions that products can be pinned to through overrides.
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::entities::region::{Region, TaxRateDefinition};
//! use tax_provider::domain::value_objects::ids::{RegionId, TaxRateId};
//! use rust_decimal::Decimal;
//!
//! let region = Region::new(RegionId::new("R1").unwrap(), "Europe", Decimal::from(10))
//!     .unwrap()
//!     .with_tax_rate(TaxRateDefinition::new(
//!         TaxRateId::new("t1").unwrap(),
//!         Decimal::from(20),
//!         "Standard",
//!         "STD",
//!     ));
//!
//! assert!(region.has_tax_rates());
//! assert_eq!(region.default_rate(), Decimal::from(10));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ids::{RegionId, TaxRateId};
use crate::domain::value_objects::tax_rate::TaxServiceRate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, coded rate configured on a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateDefinition {
    /// Rate definition identifier.
    pub id: TaxRateId,
    /// Rate in percent.
    pub rate: Decimal,
    /// Display name.
    pub name: String,
    /// Rate code.
    pub code: String,
}

impl TaxRateDefinition {
    /// Creates a new rate definition.
    #[must_use]
    pub fn new(id: TaxRateId, rate: Decimal, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            rate,
            name: name.into(),
            code: code.into(),
        }
    }

    /// Converts the definition into the rate triple handed to strategies.
    #[must_use]
    pub fn to_service_rate(&self) -> TaxServiceRate {
        TaxServiceRate::new(self.rate, self.name.clone(), self.code.clone())
    }
}

/// A configured tax jurisdiction.
///
/// # Invariants
///
/// - The default rate is always defined and non-negative, even when no rate
///   definitions are configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    id: RegionId,
    name: String,
    tax_rate: Decimal,
    tax_rates: Vec<TaxRateDefinition>,
}

impl Region {
    /// Creates a region with no rate definitions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRate` if `default_rate` is negative.
    pub fn new(id: RegionId, name: impl Into<String>, default_rate: Decimal) -> DomainResult<Self> {
        if default_rate < Decimal::ZERO {
            return Err(DomainError::invalid_rate(format!(
                "region default rate {default_rate} must not be negative"
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            tax_rate: default_rate,
            tax_rates: Vec::new(),
        })
    }

    /// Appends a rate definition.
    #[must_use]
    pub fn with_tax_rate(mut self, definition: TaxRateDefinition) -> Self {
        self.tax_rates.push(definition);
        self
    }

    /// Returns the region ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RegionId {
        &self.id
    }

    /// Returns the region name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the default tax rate.
    #[inline]
    #[must_use]
    pub fn default_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Returns the rate definitions in configuration order.
    #[inline]
    #[must_use]
    pub fn tax_rates(&self) -> &[TaxRateDefinition] {
        &self.tax_rates
    }

    /// Returns true if at least one rate definition is configured.
    #[must_use]
    pub fn has_tax_rates(&self) -> bool {
        !self.tax_rates.is_empty()
    }

    /// Returns the IDs of all rate definitions.
    #[must_use]
    pub fn tax_rate_ids(&self) -> Vec<TaxRateId> {
        self.tax_rates.iter().map(|tr| tr.id.clone()).collect()
    }

    /// Looks up a rate definition by ID.
    #[must_use]
    pub fn find_tax_rate(&self, id: &TaxRateId) -> Option<&TaxRateDefinition> {
        self.tax_rates.iter().find(|tr| &tr.id == id)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region({} default={}% rates={})",
            self.id,
            self.tax_rate,
            self.tax_rates.len()
        )
    }
}
