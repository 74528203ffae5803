//! # Tax Rates
//!
//! The resolved rate triple ([`TaxServiceRate`]) and the ordered collection of
//! triples applicable to one product in one region ([`RateSet`]).
//!
//! A [`RateSet`] is what the rate cache stores, so its serialized form is the
//! cache value format: a JSON array of `{rate, name, code}` objects with the
//! rate written as a JSON number.
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::value_objects::tax_rate::{RateSet, TaxServiceRate};
//! use rust_decimal::Decimal;
//!
//! let rates = RateSet::default_for(Decimal::from(10));
//! assert!(rates.is_default());
//!
//! let json = serde_json::to_string(&rates).unwrap();
//! assert_eq!(json, r#"[{"rate":10,"name":"default","code":"default"}]"#);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to the region default rate.
pub const DEFAULT_RATE_NAME: &str = "default";

/// Code given to the region default rate.
pub const DEFAULT_RATE_CODE: &str = "default";

/// One applicable tax rate: numeric rate, display name and code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxServiceRate {
    /// Rate in percent.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub rate: Decimal,
    /// Human-readable rate name.
    pub name: String,
    /// Rate code.
    pub code: String,
}

impl TaxServiceRate {
    /// Creates a new rate triple.
    #[must_use]
    pub fn new(rate: Decimal, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            rate,
            name: name.into(),
            code: code.into(),
        }
    }

    /// Creates the region default triple for the given rate.
    #[must_use]
    pub fn default_rate(rate: Decimal) -> Self {
        Self::new(rate, DEFAULT_RATE_NAME, DEFAULT_RATE_CODE)
    }

    /// Returns true if this is a region default triple.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_RATE_NAME && self.code == DEFAULT_RATE_CODE
    }

    fn validate(&self) -> DomainResult<()> {
        if self.rate < Decimal::ZERO {
            return Err(DomainError::invalid_rate(format!(
                "{} must not be negative",
                self.rate
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TaxServiceRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}%", self.name, self.code, self.rate)
    }
}

/// Ordered, non-empty sequence of rates applicable to one product in one region.
///
/// # Invariants
///
/// - At least one rate
/// - Every rate is non-negative
///
/// Name and code are carried verbatim and may be empty. Deserialization
/// enforces the same invariants and requires every entry to carry a numeric
/// `rate` plus string `name` and `code`, so a cached payload that parses as
/// JSON but has the wrong shape is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxServiceRate>", into = "Vec<TaxServiceRate>")]
pub struct RateSet(Vec<TaxServiceRate>);

impl RateSet {
    /// Creates a validated rate set.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRateSet` if `rates` is empty and
    /// `DomainError::InvalidRate` if a rate is negative.
    pub fn new(rates: Vec<TaxServiceRate>) -> DomainResult<Self> {
        if rates.is_empty() {
            return Err(DomainError::invalid_rate_set("must contain at least one rate"));
        }
        for rate in &rates {
            rate.validate()?;
        }
        Ok(Self(rates))
    }

    /// Creates the single-entry default rate set.
    #[must_use]
    pub fn default_for(rate: Decimal) -> Self {
        Self(vec![TaxServiceRate::default_rate(rate)])
    }

    /// Returns true if this set is exactly the region default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.is_default())
    }

    /// Returns the rates in order.
    #[must_use]
    pub fn rates(&self) -> &[TaxServiceRate] {
        &self.0
    }

    /// Returns the number of rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set has no rates. Never true for a validated set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the rates.
    pub fn iter(&self) -> std::slice::Iter<'_, TaxServiceRate> {
        self.0.iter()
    }

    /// Consumes the set, returning the rates.
    #[must_use]
    pub fn into_vec(self) -> Vec<TaxServiceRate> {
        self.0
    }
}

impl TryFrom<Vec<TaxServiceRate>> for RateSet {
    type Error = DomainError;

    fn try_from(rates: Vec<TaxServiceRate>) -> DomainResult<Self> {
        Self::new(rates)
    }
}

impl From<RateSet> for Vec<TaxServiceRate> {
    fn from(set: RateSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a RateSet {
    type Item = &'a TaxServiceRate;
    type IntoIter = std::slice::Iter<'a, TaxServiceRate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
