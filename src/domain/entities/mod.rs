//! # Domain Entities
//!
//! ## Reference Data
//!
//! - [`Region`]: tax jurisdiction with default rate and rate definitions
//! - [`ProductTaxRate`]: product-to-rate-definition override
//!
//! ## Orders
//!
//! - [`TaxableOrder`]: cart or order aggregate
//! - [`LineItem`]: one line of the aggregate
//!
//! ## Output
//!
//! - [`TaxLine`]: persistable tax line record

pub mod line_item;
pub mod order;
pub mod product_tax_rate;
pub mod region;
pub mod tax_line;

pub use line_item::{LineItem, ProductVariant};
pub use order::{Address, Customer, OrderKind, TaxableOrder, TaxableOrderBuilder};
pub use product_tax_rate::ProductTaxRate;
pub use region::{Region, TaxRateDefinition};
pub use tax_line::{TaxLine, TaxLineFields};
