//! Entity type definitions for the parlor order store.
//!
//! Persisted records carry their surrogate `id`; the `New*` input types are
//! what callers hand to the storage layer when registering a new row. All
//! types serialize with [`serde`] so the front end can print them as JSON or
//! YAML.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::{
    ValidationError, validate_cart_quantity, validate_inventory_quantity, validate_name,
};

/// The entities that carry a globally unique name.
///
/// Used to tag duplicate-name and validation failures with the kind of row
/// the caller was trying to create.
///
/// # Examples
///
/// ```
/// use parlor_core::NamedEntity;
///
/// assert_eq!(NamedEntity::Flavor.to_string(), "Flavor");
/// assert_eq!(NamedEntity::InventoryItem.table(), "inventory");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedEntity {
    /// A row in `flavors`.
    Flavor,
    /// A row in `inventory`.
    InventoryItem,
    /// A row in `allergens`.
    Allergen,
}

impl NamedEntity {
    /// Name of the backing table.
    pub fn table(self) -> &'static str {
        match self {
            Self::Flavor => "flavors",
            Self::InventoryItem => "inventory",
            Self::Allergen => "allergens",
        }
    }
}

impl fmt::Display for NamedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Flavor => "Flavor",
            Self::InventoryItem => "Inventory item",
            Self::Allergen => "Allergen",
        };
        f.write_str(label)
    }
}

/// A registered flavor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flavor {
    /// Surrogate key.
    pub id: i64,
    /// Unique display name.
    pub name: String,
    /// Free-form description, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the flavor is only offered seasonally.
    pub seasonal: bool,
}

/// Input for registering a flavor.
///
/// # Examples
///
/// ```
/// use parlor_core::NewFlavor;
///
/// let flavor = NewFlavor::new("Pumpkin Spice")
///     .with_description("Autumn only")
///     .seasonal(true);
/// assert!(flavor.validate().is_ok());
/// assert!(NewFlavor::new("  ").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlavor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seasonal: bool,
}

impl NewFlavor {
    /// Creates a non-seasonal flavor with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            seasonal: false,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the seasonal flag.
    pub fn seasonal(mut self, seasonal: bool) -> Self {
        self.seasonal = seasonal;
        self
    }

    /// Checks the preconditions for inserting this flavor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(NamedEntity::Flavor, &self.name)
    }
}

/// An ingredient tracked in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
}

/// Input for registering an inventory item.
///
/// Stock may be zero but never negative; there is no upper bound beyond
/// what the store's INTEGER column holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub quantity: i64,
}

impl NewInventoryItem {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Checks the preconditions for inserting this item.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(NamedEntity::InventoryItem, &self.name)?;
        validate_inventory_quantity(self.quantity)
    }
}

/// A recorded allergen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allergen {
    pub id: i64,
    pub name: String,
}

/// Input for placing a flavor in the cart.
///
/// Each insert creates an independent cart line; adding the same flavor
/// twice yields two lines rather than one line with the summed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartLine {
    pub flavor_id: i64,
    pub quantity: i64,
}

impl NewCartLine {
    pub fn new(flavor_id: i64, quantity: i64) -> Self {
        Self {
            flavor_id,
            quantity,
        }
    }

    /// Checks that the quantity is at least one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_cart_quantity(self.quantity)
    }
}

/// One cart line joined with its flavor, as shown in the cart view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartEntry {
    /// Surrogate key of the cart line (what `remove` takes).
    pub cart_line_id: i64,
    pub flavor_name: String,
    pub quantity: i64,
}

/// Finds a flavor by exact name with a linear scan.
///
/// This is how the cart view maps a selected flavor name back to the id it
/// stores in the cart line.
///
/// # Examples
///
/// ```
/// use parlor_core::{Flavor, find_flavor_by_name};
///
/// let flavors = vec![Flavor {
///     id: 7,
///     name: "Mint".into(),
///     description: None,
///     seasonal: false,
/// }];
/// assert_eq!(find_flavor_by_name(&flavors, "Mint").map(|f| f.id), Some(7));
/// assert!(find_flavor_by_name(&flavors, "mint").is_none());
/// ```
pub fn find_flavor_by_name<'a>(flavors: &'a [Flavor], name: &str) -> Option<&'a Flavor> {
    flavors.iter().find(|flavor| flavor.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flavor(id: i64, name: &str) -> Flavor {
        Flavor {
            id,
            name: name.to_string(),
            description: None,
            seasonal: false,
        }
    }

    #[test]
    fn test_new_flavor_builder() {
        let flavor = NewFlavor::new("Vanilla")
            .with_description("Classic")
            .seasonal(true);
        assert_eq!(flavor.name, "Vanilla");
        assert_eq!(flavor.description.as_deref(), Some("Classic"));
        assert!(flavor.seasonal);
    }

    #[test]
    fn test_new_flavor_rejects_blank_name() {
        assert_eq!(
            NewFlavor::new("").validate(),
            Err(ValidationError::EmptyName(NamedEntity::Flavor))
        );
    }

    #[test]
    fn test_new_inventory_item_allows_zero_quantity() {
        assert!(NewInventoryItem::new("Sugar", 0).validate().is_ok());
    }

    #[test]
    fn test_new_inventory_item_rejects_negative_quantity() {
        assert_eq!(
            NewInventoryItem::new("Sugar", -1).validate(),
            Err(ValidationError::NegativeInventoryQuantity(-1))
        );
    }

    #[test]
    fn test_new_inventory_item_allows_quantity_past_u32() {
        let quantity = i64::from(u32::MAX) + 1;
        assert!(NewInventoryItem::new("Ice", quantity).validate().is_ok());
    }

    #[test]
    fn test_new_cart_line_rejects_non_positive_quantity() {
        assert_eq!(
            NewCartLine::new(1, 0).validate(),
            Err(ValidationError::NonPositiveCartQuantity(0))
        );
        assert_eq!(
            NewCartLine::new(1, -2).validate(),
            Err(ValidationError::NonPositiveCartQuantity(-2))
        );
        assert!(NewCartLine::new(1, 1).validate().is_ok());
    }

    #[test]
    fn test_find_flavor_by_name_returns_first_match() {
        let flavors = vec![flavor(1, "Vanilla"), flavor(2, "Chocolate")];
        assert_eq!(find_flavor_by_name(&flavors, "Chocolate").unwrap().id, 2);
        assert!(find_flavor_by_name(&flavors, "Strawberry").is_none());
        assert!(find_flavor_by_name(&[], "Vanilla").is_none());
    }

    #[test]
    fn test_flavor_serializes_without_missing_description() {
        let json = serde_json::to_value(flavor(3, "Mango")).unwrap();
        assert_eq!(json["name"], "Mango");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_named_entity_tables() {
        assert_eq!(NamedEntity::Flavor.table(), "flavors");
        assert_eq!(NamedEntity::Allergen.table(), "allergens");
        assert_eq!(NamedEntity::InventoryItem.to_string(), "Inventory item");
    }
}
