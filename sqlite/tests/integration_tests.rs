//! Integration tests for the parlor-sqlite crate.

use std::collections::HashSet;

use parlor_core::{CartEntry, NamedEntity, NewFlavor, NewInventoryItem};
use parlor_sqlite::{Migration, ParlorStore, StoreError, TABLES};
use rusqlite::Connection;

/// A quantity that does not fit in 32 bits.
const BEYOND_U32: i64 = u32::MAX as i64 + 1;

/// Helper to open an in-memory store with the schema applied.
fn setup_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    let mut migration = Migration::new(conn).unwrap();
    migration.up().unwrap();
    migration.into_connection()
}

fn count_named(conn: &Connection, table: &str, name: &str) -> i64 {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE name = ?1"),
        [name],
        |row| row.get(0),
    )
    .unwrap()
}

fn cart_quantities(entries: &[CartEntry]) -> Vec<i64> {
    let mut quantities: Vec<i64> = entries.iter().map(|e| e.quantity).collect();
    quantities.sort_unstable();
    quantities
}

// =============================================================================
// Schema Initializer
// =============================================================================

#[test]
fn test_schema_initializer_twice_on_empty_store() {
    let conn = Connection::open_in_memory().unwrap();
    let mut migration = Migration::new(conn).unwrap();

    migration.up().unwrap();
    let first = migration.status().unwrap();
    migration.up().unwrap();
    let second = migration.status().unwrap();

    assert!(first.tables_exist);
    assert_eq!(first, second);

    let conn = migration.connection();
    for table in TABLES {
        let exists: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1, "table {table} should exist");
    }
}

#[test]
fn test_schema_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icecream.db");

    {
        let mut migration = Migration::new(Connection::open(&path).unwrap()).unwrap();
        migration.up().unwrap();
        let conn = migration.into_connection();
        let store = ParlorStore::new(&conn).unwrap();
        store.add_flavor(&NewFlavor::new("Vanilla")).unwrap();
    }

    let mut migration = Migration::new(Connection::open(&path).unwrap()).unwrap();
    migration.up().unwrap();
    let status = migration.status().unwrap();
    assert_eq!(status.flavor_count, 1);
}

#[test]
fn test_status_counts_every_table() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let vanilla = store.add_flavor(&NewFlavor::new("Vanilla")).unwrap();
    store
        .add_inventory_item(&NewInventoryItem::new("Cream", 10))
        .unwrap();
    store.add_allergen("Milk").unwrap();
    store.add_to_cart(vanilla, 1).unwrap();
    store.add_to_cart(vanilla, 4).unwrap();

    let migration = Migration::new(conn).unwrap();
    let status = migration.status().unwrap();
    assert_eq!(status.flavor_count, 1);
    assert_eq!(status.inventory_count, 1);
    assert_eq!(status.allergen_count, 1);
    assert_eq!(status.cart_line_count, 2);
    assert_eq!(status.suggestion_count, 0);
    assert_eq!(status.flavor_allergen_count, 0);
}

// =============================================================================
// Registrars
// =============================================================================

#[test]
fn test_duplicate_flavor_is_rejected() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();

    store
        .add_flavor(&NewFlavor::new("Vanilla").with_description("Classic"))
        .unwrap();
    assert!(
        store
            .list_flavors()
            .unwrap()
            .iter()
            .any(|f| f.name == "Vanilla")
    );

    let err = store
        .add_flavor(&NewFlavor::new("Vanilla").seasonal(true))
        .unwrap_err();
    assert!(err.is_duplicate_name());
    assert_eq!(err.to_string(), "Flavor 'Vanilla' already exists");

    assert_eq!(count_named(&conn, "flavors", "Vanilla"), 1);
    let vanilla = store
        .list_flavors()
        .unwrap()
        .into_iter()
        .find(|f| f.name == "Vanilla")
        .unwrap();
    assert_eq!(vanilla.description.as_deref(), Some("Classic"));
    assert!(!vanilla.seasonal);
}

#[test]
fn test_duplicate_allergen_is_rejected() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();

    store.add_allergen("Peanuts").unwrap();
    match store.add_allergen("Peanuts") {
        Err(StoreError::DuplicateName { entity, name }) => {
            assert_eq!(entity, NamedEntity::Allergen);
            assert_eq!(name, "Peanuts");
        }
        other => panic!("expected DuplicateName, got {other:?}"),
    }
    assert_eq!(count_named(&conn, "allergens", "Peanuts"), 1);
}

#[test]
fn test_duplicate_inventory_item_is_rejected() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();

    store
        .add_inventory_item(&NewInventoryItem::new("Sugar", 25))
        .unwrap();
    let err = store
        .add_inventory_item(&NewInventoryItem::new("Sugar", 3))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateName {
            entity: NamedEntity::InventoryItem,
            ..
        }
    ));

    let items = store.list_inventory().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 25);
}

#[test]
fn test_names_are_case_sensitive() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    store.add_flavor(&NewFlavor::new("Mint")).unwrap();
    store.add_flavor(&NewFlavor::new("mint")).unwrap();
    assert_eq!(store.list_flavors().unwrap().len(), 2);
}

#[test]
fn test_inventory_accepts_zero_and_large_quantities() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    store
        .add_inventory_item(&NewInventoryItem::new("Saffron", 0))
        .unwrap();
    store
        .add_inventory_item(&NewInventoryItem::new("Ice", BEYOND_U32))
        .unwrap();

    let quantities: HashSet<i64> = store
        .list_inventory()
        .unwrap()
        .into_iter()
        .map(|item| item.quantity)
        .collect();
    assert_eq!(quantities, HashSet::from([0, BEYOND_U32]));
}

#[test]
fn test_inventory_listing_reads_rows_from_other_writers() {
    let conn = setup_conn();
    conn.execute_batch(
        "INSERT INTO inventory (name, quantity) VALUES ('Ice', 5000000000);
         INSERT INTO inventory (name, quantity) VALUES ('Milk', 3);",
    )
    .unwrap();
    let store = ParlorStore::new(&conn).unwrap();

    let mut items: Vec<(String, i64)> = store
        .list_inventory()
        .unwrap()
        .into_iter()
        .map(|item| (item.name, item.quantity))
        .collect();
    items.sort();
    assert_eq!(
        items,
        vec![("Ice".to_string(), 5_000_000_000), ("Milk".to_string(), 3)]
    );
}

#[test]
fn test_cart_listing_reads_large_quantities() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let vanilla = store.add_flavor(&NewFlavor::new("Vanilla")).unwrap();
    store.add_to_cart(vanilla, BEYOND_U32).unwrap();

    let cart = store.list_cart().unwrap();
    assert_eq!(cart_quantities(&cart), vec![BEYOND_U32]);
}

#[test]
fn test_negative_inventory_quantity_writes_nothing() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let err = store
        .add_inventory_item(&NewInventoryItem::new("Sugar", -1))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.list_inventory().unwrap().is_empty());
}

#[test]
fn test_blank_names_write_nothing() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    assert!(matches!(
        store.add_flavor(&NewFlavor::new("")),
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.add_inventory_item(&NewInventoryItem::new(" ", 1)),
        Err(StoreError::Validation(_))
    ));
    assert!(store.list_flavors().unwrap().is_empty());
    assert!(store.list_inventory().unwrap().is_empty());
}

// =============================================================================
// Cart Manager
// =============================================================================

#[test]
fn test_add_to_cart_never_merges_lines() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let vanilla = store.add_flavor(&NewFlavor::new("Vanilla")).unwrap();

    let first = store.add_to_cart(vanilla, 2).unwrap();
    let second = store.add_to_cart(vanilla, 3).unwrap();
    assert_ne!(first, second);

    let cart = store.list_cart().unwrap();
    assert_eq!(cart.len(), 2);
    assert!(cart.iter().all(|e| e.flavor_name == "Vanilla"));
    assert_eq!(cart_quantities(&cart), vec![2, 3]);
}

#[test]
fn test_remove_missing_cart_line_is_silent() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let mint = store.add_flavor(&NewFlavor::new("Mint")).unwrap();
    store.add_to_cart(mint, 1).unwrap();

    let before: HashSet<CartEntry> = store.list_cart().unwrap().into_iter().collect();
    let removed = store.remove_from_cart(9_999).unwrap();
    let after: HashSet<CartEntry> = store.list_cart().unwrap().into_iter().collect();

    assert!(!removed);
    assert_eq!(before, after);
}

#[test]
fn test_remove_from_cart_deletes_only_that_line() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let mint = store.add_flavor(&NewFlavor::new("Mint")).unwrap();
    let mango = store.add_flavor(&NewFlavor::new("Mango")).unwrap();
    let keep = store.add_to_cart(mint, 1).unwrap();
    let drop = store.add_to_cart(mango, 2).unwrap();

    assert!(store.remove_from_cart(drop).unwrap());

    let cart = store.list_cart().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].cart_line_id, keep);
    assert_eq!(cart[0].flavor_name, "Mint");
}

#[test]
fn test_cart_line_for_missing_flavor_is_store_error() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let err = store.add_to_cart(404, 1).unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));
    assert!(store.list_cart().unwrap().is_empty());
}

#[test]
fn test_reads_are_idempotent() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    let vanilla = store.add_flavor(&NewFlavor::new("Vanilla")).unwrap();
    let berry = store
        .add_flavor(&NewFlavor::new("Berry").seasonal(true))
        .unwrap();
    store.add_to_cart(vanilla, 1).unwrap();
    store.add_to_cart(berry, 5).unwrap();

    let flavors_a: HashSet<_> = store.list_flavors().unwrap().into_iter().collect();
    let flavors_b: HashSet<_> = store.list_flavors().unwrap().into_iter().collect();
    assert_eq!(flavors_a, flavors_b);
    assert_eq!(flavors_a.len(), 2);

    let cart_a: HashSet<_> = store.list_cart().unwrap().into_iter().collect();
    let cart_b: HashSet<_> = store.list_cart().unwrap().into_iter().collect();
    assert_eq!(cart_a, cart_b);
    assert_eq!(cart_a.len(), 2);
}

#[test]
fn test_empty_store_lists_are_empty() {
    let conn = setup_conn();
    let store = ParlorStore::new(&conn).unwrap();
    assert!(store.list_flavors().unwrap().is_empty());
    assert!(store.list_inventory().unwrap().is_empty());
    assert!(store.list_allergens().unwrap().is_empty());
    assert!(store.list_cart().unwrap().is_empty());
}

#[test]
fn test_operations_without_schema_are_store_errors() {
    let conn = Connection::open_in_memory().unwrap();
    let store = ParlorStore::new(&conn).unwrap();
    assert!(matches!(
        store.add_allergen("Milk"),
        Err(StoreError::Database(_))
    ));
    assert!(matches!(store.list_cart(), Err(StoreError::Database(_))));
}
