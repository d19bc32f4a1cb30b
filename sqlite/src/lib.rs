//! SQLite storage for the ice-cream parlor order store.
//!
//! This crate owns the six-table schema and every operation the front end
//! performs against it: registering flavors, inventory items and allergens,
//! and managing cart lines.
//!
//! # Architecture
//!
//! - **`schema`** — the `CREATE TABLE` / `DROP TABLE` scripts
//! - **`migration`** — schema lifecycle (up/down/reset/status)
//! - **`convert`** — single-statement inserts and row mappers
//! - **`store`** — [`ParlorStore`], the registrars and cart operations
//!
//! No file path is baked in: callers open a [`rusqlite::Connection`] and
//! pass it in, which lets tests run against `Connection::open_in_memory()`.
//!
//! # Quick start
//!
//! ```no_run
//! use parlor_core::NewFlavor;
//! use parlor_sqlite::{Migration, ParlorStore, StoreError};
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("icecream.db").unwrap();
//! let mut migration = Migration::new(conn).unwrap();
//! migration.up().unwrap();
//!
//! let conn = migration.into_connection();
//! let store = ParlorStore::new(&conn).unwrap();
//! match store.add_flavor(&NewFlavor::new("Vanilla")) {
//!     Ok(id) => println!("added flavor {id}"),
//!     Err(StoreError::DuplicateName { name, .. }) => println!("{name} already exists"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```
//!
//! # Uniqueness
//!
//! Flavor, inventory and allergen names are unique through the table's own
//! `UNIQUE` constraint. A violating insert is reported as
//! [`StoreError::DuplicateName`] for all three; there is no separate
//! look-up before the insert.

mod convert;
mod error;
mod migration;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use migration::{Migration, MigrationStatus};
pub use schema::TABLES;
pub use store::ParlorStore;
