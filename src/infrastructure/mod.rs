//! # Infrastructure Layer
//!
//! Adapters for the external collaborators of the tax provider.
//!
//! - [`cache`]: key-value stores behind the rate cache
//! - [`events`]: event-notification bus
//! - [`persistence`]: override store, tax line factory and persistence scopes

pub mod cache;
pub mod events;
pub mod persistence;
