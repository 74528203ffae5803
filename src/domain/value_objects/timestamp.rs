//! # Timestamp Value Object
//!
//! UTC timestamp wrapper used for record creation times and cache expiry.
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::value_objects::timestamp::Timestamp;
//!
//! let now = Timestamp::now();
//! let later = now.add_secs(30);
//!
//! assert!(later.is_after(&now));
//! assert!(!later.is_expired());
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps an existing `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub fn get(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns a new timestamp with `secs` seconds added.
    ///
    /// Saturates at the original value if the addition overflows.
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        self.add_duration(Duration::seconds(secs))
    }

    /// Returns a new timestamp with `millis` milliseconds added.
    #[must_use]
    pub fn add_millis(&self, millis: i64) -> Self {
        self.add_duration(Duration::milliseconds(millis))
    }

    fn add_duration(&self, duration: Duration) -> Self {
        Self(self.0.checked_add_signed(duration).unwrap_or(self.0))
    }

    /// Returns true if this timestamp is strictly before `other`.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is strictly after `other`.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns true if this timestamp is at or before the current moment.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0 <= Utc::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
