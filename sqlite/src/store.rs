//! Registrars and cart operations over an open connection.
//!
//! [`ParlorStore`] borrows a connection whose schema was created by
//! [`Migration::up`](crate::Migration::up). Each write runs in its own
//! transaction, so a failed insert leaves no partial rows behind.
//!
//! # Example
//!
//! ```no_run
//! use parlor_core::NewFlavor;
//! use parlor_sqlite::ParlorStore;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("icecream.db").unwrap();
//! let store = ParlorStore::new(&conn).unwrap();
//!
//! let id = store.add_flavor(&NewFlavor::new("Vanilla")).unwrap();
//! store.add_to_cart(id, 2).unwrap();
//!
//! for entry in store.list_cart().unwrap() {
//!     println!("{}: {}", entry.flavor_name, entry.quantity);
//! }
//! ```

use parlor_core::{
    Allergen, CartEntry, Flavor, InventoryItem, NamedEntity, NewCartLine, NewFlavor,
    NewInventoryItem, validate_name,
};
use rusqlite::{Connection, Row, params};
use tracing::debug;

use crate::convert;
use crate::error::Result;

/// Read and write access to the parlor tables.
///
/// Holds no state besides the borrowed connection; every method is a single
/// request/response against the store.
pub struct ParlorStore<'a> {
    conn: &'a Connection,
}

impl<'a> ParlorStore<'a> {
    /// Wraps a connection and enables foreign key enforcement on it.
    pub fn new(conn: &'a Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Registers a flavor and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`](crate::StoreError::DuplicateName)
    /// if a flavor with the same name exists, or
    /// [`StoreError::Validation`](crate::StoreError::Validation) for a blank
    /// name.
    pub fn add_flavor(&self, flavor: &NewFlavor) -> Result<i64> {
        flavor.validate()?;
        let tx = self.conn.unchecked_transaction()?;
        let id = convert::insert_flavor(&tx, flavor)?;
        tx.commit()?;
        debug!(id, name = %flavor.name, seasonal = flavor.seasonal, "flavor added");
        Ok(id)
    }

    /// Registers an inventory item and returns its id.
    ///
    /// Inventory names are unique like flavor and allergen names, and a
    /// repeat is reported the same way.
    pub fn add_inventory_item(&self, item: &NewInventoryItem) -> Result<i64> {
        item.validate()?;
        let tx = self.conn.unchecked_transaction()?;
        let id = convert::insert_inventory_item(&tx, item)?;
        tx.commit()?;
        debug!(id, name = %item.name, quantity = item.quantity, "inventory item added");
        Ok(id)
    }

    /// Registers an allergen and returns its id.
    pub fn add_allergen(&self, name: &str) -> Result<i64> {
        validate_name(NamedEntity::Allergen, name)?;
        let tx = self.conn.unchecked_transaction()?;
        let id = convert::insert_allergen(&tx, name)?;
        tx.commit()?;
        debug!(id, name, "allergen added");
        Ok(id)
    }

    /// Places `quantity` of a flavor in the cart as a new line and returns
    /// the line id.
    ///
    /// Lines are never merged: adding the same flavor twice produces two
    /// lines.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`](crate::StoreError::Database) if the
    /// flavor does not exist, or
    /// [`StoreError::Validation`](crate::StoreError::Validation) for a
    /// quantity below one.
    pub fn add_to_cart(&self, flavor_id: i64, quantity: i64) -> Result<i64> {
        let line = NewCartLine::new(flavor_id, quantity);
        line.validate()?;
        let tx = self.conn.unchecked_transaction()?;
        let id = convert::insert_cart_line(&tx, &line)?;
        tx.commit()?;
        debug!(id, flavor_id, quantity, "cart line added");
        Ok(id)
    }

    /// Deletes a cart line by id.
    ///
    /// Returns whether a line was removed. An unknown id is not an error.
    pub fn remove_from_cart(&self, cart_line_id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let rows = tx.execute("DELETE FROM cart WHERE id = ?1", params![cart_line_id])?;
        tx.commit()?;
        debug!(cart_line_id, removed = rows, "cart line removal");
        Ok(rows > 0)
    }

    /// Lists every cart line with its flavor name. Order is unspecified.
    pub fn list_cart(&self) -> Result<Vec<CartEntry>> {
        self.query_all(
            "SELECT cart.id, flavors.name, cart.quantity \
             FROM cart JOIN flavors ON cart.flavor_id = flavors.id",
            convert::cart_entry_from_row,
        )
    }

    /// Lists every flavor. Order is unspecified.
    pub fn list_flavors(&self) -> Result<Vec<Flavor>> {
        self.query_all(
            "SELECT id, name, description, seasonal FROM flavors",
            convert::flavor_from_row,
        )
    }

    /// Lists every inventory item. Order is unspecified.
    pub fn list_inventory(&self) -> Result<Vec<InventoryItem>> {
        self.query_all(
            "SELECT id, name, quantity FROM inventory",
            convert::inventory_item_from_row,
        )
    }

    /// Lists every allergen. Order is unspecified.
    pub fn list_allergens(&self) -> Result<Vec<Allergen>> {
        self.query_all("SELECT id, name FROM allergens", convert::allergen_from_row)
    }

    fn query_all<T>(
        &self,
        sql: &str,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], map)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
