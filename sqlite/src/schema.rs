//! SQL schema for the parlor store.
//!
//! # Table structure
//!
//! - `flavors` — flavor offerings, unique by name
//! - `inventory` — ingredient stock, unique by name
//! - `suggestions` — customer suggestions per flavor (reserved, unused)
//! - `allergens` — allergens, unique by name
//! - `flavor_allergens` — flavor/allergen link keyed by both ids (reserved, unused)
//! - `cart` — cart lines referencing a flavor
//!
//! Every statement is `IF [NOT] EXISTS`, so applying either script twice is
//! harmless.

/// Table names in dependency order (referenced tables first).
pub const TABLES: [&str; 6] = [
    "flavors",
    "inventory",
    "suggestions",
    "allergens",
    "flavor_allergens",
    "cart",
];

/// Creates all six tables.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS flavors (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    seasonal BOOLEAN NOT NULL,
    UNIQUE(name)
);

CREATE TABLE IF NOT EXISTS inventory (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity >= 0),
    UNIQUE(name)
);

CREATE TABLE IF NOT EXISTS suggestions (
    id INTEGER PRIMARY KEY,
    flavor_id INTEGER NOT NULL,
    suggestion TEXT NOT NULL,
    FOREIGN KEY (flavor_id) REFERENCES flavors(id)
);

CREATE TABLE IF NOT EXISTS allergens (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    UNIQUE(name)
);

CREATE TABLE IF NOT EXISTS flavor_allergens (
    flavor_id INTEGER NOT NULL,
    allergen_id INTEGER NOT NULL,
    PRIMARY KEY (flavor_id, allergen_id),
    FOREIGN KEY (flavor_id) REFERENCES flavors(id),
    FOREIGN KEY (allergen_id) REFERENCES allergens(id)
);

CREATE TABLE IF NOT EXISTS cart (
    id INTEGER PRIMARY KEY,
    flavor_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    FOREIGN KEY (flavor_id) REFERENCES flavors(id)
);
"#;

/// Drops all six tables, referencing tables first.
pub const DROP_SQL: &str = r#"
DROP TABLE IF EXISTS cart;
DROP TABLE IF EXISTS flavor_allergens;
DROP TABLE IF EXISTS allergens;
DROP TABLE IF EXISTS suggestions;
DROP TABLE IF EXISTS inventory;
DROP TABLE IF EXISTS flavors;
"#;
