//! Input preconditions.
//!
//! The store relies on its own constraints for uniqueness; the checks here
//! only cover what must hold before a row is worth sending to the store at
//! all: names that are not blank, inventory stock that is not negative, and
//! cart quantities of at least one.
//!
//! # Examples
//!
//! ```
//! use parlor_core::*;
//!
//! assert!(validate_name(NamedEntity::Allergen, "Peanuts").is_ok());
//! assert_eq!(
//!     validate_name(NamedEntity::Allergen, "   "),
//!     Err(ValidationError::EmptyName(NamedEntity::Allergen))
//! );
//! ```

use thiserror::Error;

use crate::NamedEntity;

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty or whitespace-only.
    #[error("{0} name cannot be empty")]
    EmptyName(NamedEntity),
    /// Inventory stock below zero.
    #[error("inventory quantity cannot be negative (got {0})")]
    NegativeInventoryQuantity(i64),
    /// Cart lines must hold at least one scoop.
    #[error("cart quantity must be at least 1 (got {0})")]
    NonPositiveCartQuantity(i64),
}

/// Rejects empty and whitespace-only names.
pub fn validate_name(entity: NamedEntity, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName(entity));
    }
    Ok(())
}

/// Rejects negative inventory stock. Zero is allowed.
pub fn validate_inventory_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 0 {
        return Err(ValidationError::NegativeInventoryQuantity(quantity));
    }
    Ok(())
}

/// Rejects a cart quantity below one.
pub fn validate_cart_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::NonPositiveCartQuantity(quantity));
    }
    Ok(())
}
