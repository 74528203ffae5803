//! # Tax Provider
//!
//! Tax rate resolution and tax line computation for carts and orders.
//!
//! For every line item the provider determines the rates that apply to the
//! item's product in the order's region, then hands the items and rates to
//! a pluggable calculation strategy and records the resulting tax lines in
//! the caller's persistence scope.
//!
//! # Rate Resolution
//!
//! 1. A cached rate set for `(product, region)`, if valid
//! 2. Product overrides that reference the region's rate definitions
//! 3. The region default rate
//!
//! Resolved rates are cached for a short TTL under
//! `txrtcache:<product_id>:<region_id>`. The cache is best-effort: store
//! faults read as misses, corrupt entries are deleted, failed writes are
//! dropped.
//!
//! # Layers
//!
//! - [`domain`]: identifiers, rates, regions, orders and tax lines
//! - [`application`]: rate cache, resolver, strategies and the service facade
//! - [`infrastructure`]: cache stores, override stores, persistence scopes and
//!   event buses
//! - [`config`]: layered runtime configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::services::TaxProviderService;
pub use application::{ApplicationError, ApplicationResult};
