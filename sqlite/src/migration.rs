//! Schema lifecycle operations.
//!
//! Provides [`Migration`] for creating and dropping the six parlor tables
//! and for reporting what is currently stored. Mutations run inside a
//! transaction.
//!
//! # Example
//!
//! ```no_run
//! use parlor_sqlite::Migration;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("icecream.db").unwrap();
//! let mut migration = Migration::new(conn).unwrap();
//!
//! // Safe on every start
//! migration.up().unwrap();
//!
//! let status = migration.status().unwrap();
//! assert!(status.tables_exist);
//! ```

use parlor_core::NamedEntity;
use rusqlite::Connection;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::schema::{DROP_SQL, SCHEMA_SQL, TABLES};

/// Manages the lifecycle of the parlor tables.
///
/// Owns the connection so that startup code can create the schema and then
/// hand the connection on via [`into_connection`](Self::into_connection).
pub struct Migration {
    conn: Connection,
}

impl Migration {
    /// Wraps a connection and enables foreign key enforcement on it.
    pub fn new(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Creates all tables.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS`, so calling it against an existing
    /// store changes nothing.
    pub fn up(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(SCHEMA_SQL)
            .map_err(|e| StoreError::Migration(format!("failed to create tables: {e}")))?;
        tx.commit()?;
        info!(tables = TABLES.len(), "parlor schema ready");
        Ok(())
    }

    /// Drops all tables and their rows. Safe when the tables do not exist.
    pub fn down(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(DROP_SQL)
            .map_err(|e| StoreError::Migration(format!("failed to drop tables: {e}")))?;
        tx.commit()?;
        info!("parlor schema dropped");
        Ok(())
    }

    /// Drops and recreates all tables, leaving an empty store.
    pub fn reset(&mut self) -> Result<()> {
        self.down()?;
        self.up()
    }

    /// Reports whether the tables exist and how many rows each holds.
    pub fn status(&self) -> Result<MigrationStatus> {
        if !self.tables_exist()? {
            return Ok(MigrationStatus::default());
        }

        Ok(MigrationStatus {
            tables_exist: true,
            flavor_count: self.count_rows(NamedEntity::Flavor.table())?,
            inventory_count: self.count_rows(NamedEntity::InventoryItem.table())?,
            suggestion_count: self.count_rows("suggestions")?,
            allergen_count: self.count_rows(NamedEntity::Allergen.table())?,
            flavor_allergen_count: self.count_rows("flavor_allergens")?,
            cart_line_count: self.count_rows("cart")?,
        })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the migration and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Checks that every parlor table exists.
    fn tables_exist(&self) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
        for table in TABLES {
            let count: i64 = stmt.query_row([table], |row| row.get(0))?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Snapshot of the schema state, returned by [`Migration::status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Whether all six tables exist. Counts are zero when this is `false`.
    pub tables_exist: bool,
    pub flavor_count: usize,
    pub inventory_count: usize,
    pub suggestion_count: usize,
    pub allergen_count: usize,
    pub flavor_allergen_count: usize,
    pub cart_line_count: usize,
}
