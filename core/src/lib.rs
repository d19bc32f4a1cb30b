//! Core entity types for the ice-cream parlor order store.
//!
//! This crate defines the records the storage layer reads and writes:
//!
//! - [`Flavor`] / [`NewFlavor`] — flavors offered by the shop.
//! - [`InventoryItem`] / [`NewInventoryItem`] — ingredient stock.
//! - [`Allergen`] — allergens the shop records.
//! - [`NewCartLine`] / [`CartEntry`] — cart lines and their joined view.
//!
//! Input preconditions ([`validate_name`], [`validate_inventory_quantity`],
//! [`validate_cart_quantity`]) reject blank names, negative stock and empty
//! cart lines before they reach the store.
//!
//! # Example
//!
//! ```
//! use parlor_core::*;
//!
//! let flavor = NewFlavor::new("Vanilla").with_description("Madagascar bourbon");
//! assert!(flavor.validate().is_ok());
//!
//! let cart_line = NewCartLine::new(1, 2);
//! assert!(cart_line.validate().is_ok());
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{
    ValidationError, validate_cart_quantity, validate_inventory_quantity, validate_name,
};
