//! Conversion between parlor entities and SQLite rows.
//!
//! Holds the single-statement inserts and the row mappers used by
//! [`ParlorStore`](crate::ParlorStore), plus the translation of SQLite's
//! UNIQUE constraint failure into [`StoreError::DuplicateName`].

use parlor_core::{
    Allergen, CartEntry, Flavor, InventoryItem, NamedEntity, NewCartLine, NewFlavor,
    NewInventoryItem,
};
use rusqlite::{Connection, Row, ffi, params};

use crate::error::{Result, StoreError};

/// Maps an insert failure to a [`StoreError`].
///
/// Only the UNIQUE constraint becomes [`StoreError::DuplicateName`]; NOT NULL,
/// CHECK and foreign key failures stay [`StoreError::Database`].
pub(crate) fn insert_error(err: rusqlite::Error, entity: NamedEntity, name: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
            return StoreError::DuplicateName {
                entity,
                name: name.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

/// Inserts a flavor and returns its row ID.
pub(crate) fn insert_flavor(conn: &Connection, flavor: &NewFlavor) -> Result<i64> {
    conn.execute(
        "INSERT INTO flavors (name, description, seasonal) VALUES (?1, ?2, ?3)",
        params![flavor.name, flavor.description, flavor.seasonal],
    )
    .map_err(|e| insert_error(e, NamedEntity::Flavor, &flavor.name))?;
    Ok(conn.last_insert_rowid())
}

/// Inserts an inventory item and returns its row ID.
pub(crate) fn insert_inventory_item(conn: &Connection, item: &NewInventoryItem) -> Result<i64> {
    conn.execute(
        "INSERT INTO inventory (name, quantity) VALUES (?1, ?2)",
        params![item.name, item.quantity],
    )
    .map_err(|e| insert_error(e, NamedEntity::InventoryItem, &item.name))?;
    Ok(conn.last_insert_rowid())
}

/// Inserts an allergen and returns its row ID.
pub(crate) fn insert_allergen(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO allergens (name) VALUES (?1)", params![name])
        .map_err(|e| insert_error(e, NamedEntity::Allergen, name))?;
    Ok(conn.last_insert_rowid())
}

/// Inserts a cart line and returns its row ID.
pub(crate) fn insert_cart_line(conn: &Connection, line: &NewCartLine) -> Result<i64> {
    conn.execute(
        "INSERT INTO cart (flavor_id, quantity) VALUES (?1, ?2)",
        params![line.flavor_id, line.quantity],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn flavor_from_row(row: &Row<'_>) -> rusqlite::Result<Flavor> {
    Ok(Flavor {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        seasonal: row.get(3)?,
    })
}

pub(crate) fn inventory_item_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
    })
}

pub(crate) fn allergen_from_row(row: &Row<'_>) -> rusqlite::Result<Allergen> {
    Ok(Allergen {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) fn cart_entry_from_row(row: &Row<'_>) -> rusqlite::Result<CartEntry> {
    Ok(CartEntry {
        cart_line_id: row.get(0)?,
        flavor_name: row.get(1)?,
        quantity: row.get(2)?,
    })
}
