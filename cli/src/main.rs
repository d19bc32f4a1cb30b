use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use parlor_core::{Flavor, NewFlavor, NewInventoryItem, find_flavor_by_name};
use parlor_sqlite::{Migration, ParlorStore};
use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

mod config;

use config::ParlorConfig;

/// Output format for list commands.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "parlor")]
#[command(about = "Flavors, inventory, allergens and cart for an ice-cream parlor")]
struct Cli {
    /// Database file path (overrides the config file).
    #[arg(long, global = true, env = "PARLOR_DB")]
    db: Option<PathBuf>,
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register and list flavors.
    Flavor(FlavorArgs),
    /// Register and list inventory items.
    Inventory(InventoryArgs),
    /// Register and list allergens.
    Allergen(AllergenArgs),
    /// View and change the cart.
    Cart(CartArgs),
    /// Database setup and status.
    Db(DbArgs),
}

#[derive(Debug, Args)]
struct FlavorArgs {
    #[command(subcommand)]
    operation: FlavorOperation,
}

#[derive(Debug, Subcommand)]
enum FlavorOperation {
    /// Add a flavor.
    Add(FlavorAddArgs),
    /// List all flavors.
    List(ListArgs),
}

#[derive(Debug, Args)]
struct FlavorAddArgs {
    /// Flavor name (must be unique).
    name: String,
    /// Optional description.
    #[arg(long)]
    description: Option<String>,
    /// Mark the flavor as seasonal.
    #[arg(long)]
    seasonal: bool,
}

#[derive(Debug, Args)]
struct InventoryArgs {
    #[command(subcommand)]
    operation: InventoryOperation,
}

#[derive(Debug, Subcommand)]
enum InventoryOperation {
    /// Add an inventory item.
    Add(InventoryAddArgs),
    /// List all inventory items.
    List(ListArgs),
}

#[derive(Debug, Args)]
struct InventoryAddArgs {
    /// Item name (must be unique).
    name: String,
    /// Quantity in stock.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    quantity: i64,
}

#[derive(Debug, Args)]
struct AllergenArgs {
    #[command(subcommand)]
    operation: AllergenOperation,
}

#[derive(Debug, Subcommand)]
enum AllergenOperation {
    /// Add an allergen.
    Add(AllergenAddArgs),
    /// List all allergens.
    List(ListArgs),
}

#[derive(Debug, Args)]
struct AllergenAddArgs {
    /// Allergen name (must be unique).
    name: String,
}

#[derive(Debug, Args)]
struct CartArgs {
    #[command(subcommand)]
    operation: CartOperation,
}

#[derive(Debug, Subcommand)]
enum CartOperation {
    /// Show the cart.
    List(ListArgs),
    /// Add a flavor to the cart.
    Add(CartAddArgs),
    /// Remove a cart line by id.
    Remove(CartRemoveArgs),
}

#[derive(Debug, Args)]
struct CartAddArgs {
    /// Flavor name, or flavor id when no flavor has that name.
    flavor: String,
    /// Number of scoops.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
    quantity: i64,
}

#[derive(Debug, Args)]
struct CartRemoveArgs {
    /// Cart line id, as shown by `cart list`.
    id: i64,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    operation: DbOperation,
}

#[derive(Debug, Subcommand)]
enum DbOperation {
    /// Create the tables if they do not exist.
    Init,
    /// Show table status and row counts.
    Status,
    /// Drop all tables and recreate them empty.
    Reset,
}

fn main() {
    let cli = Cli::parse();

    let config = match ParlorConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: Failed to load config: {err}");
            std::process::exit(1);
        }
    };
    config.logging.init();

    let db_path = cli.db.unwrap_or(config.database);

    let result = match cli.command {
        Command::Flavor(args) => with_store(&db_path, |store| run_flavor(store, args.operation)),
        Command::Inventory(args) => {
            with_store(&db_path, |store| run_inventory(store, args.operation))
        }
        Command::Allergen(args) => {
            with_store(&db_path, |store| run_allergen(store, args.operation))
        }
        Command::Cart(args) => with_store(&db_path, |store| run_cart(store, args.operation)),
        Command::Db(args) => run_db(&db_path, args.operation),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Opens the database and makes sure every table exists.
fn open_store(path: &Path) -> Result<Connection, String> {
    debug!(path = %path.display(), "opening store");
    let conn = Connection::open(path)
        .map_err(|e| format!("Failed to open database '{}': {e}", path.display()))?;
    let mut migration =
        Migration::new(conn).map_err(|e| format!("Failed to initialize database: {e}"))?;
    migration
        .up()
        .map_err(|e| format!("Failed to initialize database: {e}"))?;
    Ok(migration.into_connection())
}

/// Runs one store operation against a freshly opened connection, which is
/// closed again when the operation returns.
fn with_store(
    path: &Path,
    operation: impl FnOnce(&ParlorStore<'_>) -> Result<(), String>,
) -> Result<(), String> {
    let conn = open_store(path)?;
    let store = ParlorStore::new(&conn).map_err(|e| e.to_string())?;
    operation(&store)
}

// ---------------------------------------------------------------------------
// Registrars
// ---------------------------------------------------------------------------

fn run_flavor(store: &ParlorStore<'_>, operation: FlavorOperation) -> Result<(), String> {
    match operation {
        FlavorOperation::Add(args) => {
            let mut flavor = NewFlavor::new(args.name).seasonal(args.seasonal);
            if let Some(description) = args.description {
                flavor = flavor.with_description(description);
            }
            store.add_flavor(&flavor).map_err(|e| e.to_string())?;
            println!("Flavor '{}' added successfully!", flavor.name);
            Ok(())
        }
        FlavorOperation::List(args) => {
            let flavors = store.list_flavors().map_err(|e| e.to_string())?;
            print_list(&flavors, args.format, "No flavors yet.", |flavor| {
                let seasonal = if flavor.seasonal { " (seasonal)" } else { "" };
                match &flavor.description {
                    Some(description) if !description.is_empty() => format!(
                        "{}\t{}{seasonal}\t{description}",
                        flavor.id, flavor.name
                    ),
                    _ => format!("{}\t{}{seasonal}", flavor.id, flavor.name),
                }
            })
        }
    }
}

fn run_inventory(store: &ParlorStore<'_>, operation: InventoryOperation) -> Result<(), String> {
    match operation {
        InventoryOperation::Add(args) => {
            let item = NewInventoryItem::new(args.name, args.quantity);
            store.add_inventory_item(&item).map_err(|e| e.to_string())?;
            println!("Inventory item '{}' added successfully!", item.name);
            Ok(())
        }
        InventoryOperation::List(args) => {
            let items = store.list_inventory().map_err(|e| e.to_string())?;
            print_list(&items, args.format, "Inventory is empty.", |item| {
                format!("{}\t{}\t{}", item.id, item.name, item.quantity)
            })
        }
    }
}

fn run_allergen(store: &ParlorStore<'_>, operation: AllergenOperation) -> Result<(), String> {
    match operation {
        AllergenOperation::Add(args) => {
            store.add_allergen(&args.name).map_err(|e| e.to_string())?;
            println!("Allergen '{}' added successfully!", args.name);
            Ok(())
        }
        AllergenOperation::List(args) => {
            let allergens = store.list_allergens().map_err(|e| e.to_string())?;
            print_list(&allergens, args.format, "No allergens yet.", |allergen| {
                format!("{}\t{}", allergen.id, allergen.name)
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

fn run_cart(store: &ParlorStore<'_>, operation: CartOperation) -> Result<(), String> {
    match operation {
        CartOperation::List(args) => {
            let entries = store.list_cart().map_err(|e| e.to_string())?;
            print_list(&entries, args.format, "Your cart is empty.", |entry| {
                format!(
                    "[{}] {}: {}",
                    entry.cart_line_id, entry.flavor_name, entry.quantity
                )
            })
        }
        CartOperation::Add(args) => {
            let flavors = store.list_flavors().map_err(|e| e.to_string())?;
            let flavor = resolve_flavor(&flavors, &args.flavor)?;
            store
                .add_to_cart(flavor.id, args.quantity)
                .map_err(|e| e.to_string())?;
            println!("{} {}(s) added to your cart.", args.quantity, flavor.name);
            Ok(())
        }
        CartOperation::Remove(args) => {
            if store.remove_from_cart(args.id).map_err(|e| e.to_string())? {
                println!("Item removed from cart.");
            } else {
                println!("No cart line with id {}; nothing removed.", args.id);
            }
            Ok(())
        }
    }
}

/// Maps the user's flavor selection to a stored flavor.
///
/// An exact name match wins; otherwise a numeric selection is taken as the
/// flavor id.
fn resolve_flavor<'a>(flavors: &'a [Flavor], selection: &str) -> Result<&'a Flavor, String> {
    if flavors.is_empty() {
        return Err("No flavors available. Add a flavor first.".to_string());
    }
    if let Some(flavor) = find_flavor_by_name(flavors, selection) {
        return Ok(flavor);
    }
    selection
        .parse::<i64>()
        .ok()
        .and_then(|id| flavors.iter().find(|flavor| flavor.id == id))
        .ok_or_else(|| format!("Flavor '{selection}' not found."))
}

// ---------------------------------------------------------------------------
// Database management
// ---------------------------------------------------------------------------

fn run_db(path: &Path, operation: DbOperation) -> Result<(), String> {
    let conn = Connection::open(path)
        .map_err(|e| format!("Failed to open database '{}': {e}", path.display()))?;
    let mut migration =
        Migration::new(conn).map_err(|e| format!("Failed to initialize migration: {e}"))?;

    match operation {
        DbOperation::Init => {
            migration
                .up()
                .map_err(|e| format!("Migration up failed: {e}"))?;
            println!("Database ready at '{}'.", path.display());
        }
        DbOperation::Reset => {
            migration
                .reset()
                .map_err(|e| format!("Reset failed: {e}"))?;
            println!("Database at '{}' reset; all tables are empty.", path.display());
        }
        DbOperation::Status => {
            let status = migration
                .status()
                .map_err(|e| format!("Failed to get database status: {e}"))?;
            println!("Database Status:");
            println!(
                "  Tables exist: {}",
                if status.tables_exist { "yes" } else { "no" }
            );
            println!("  Flavors: {}", status.flavor_count);
            println!("  Inventory items: {}", status.inventory_count);
            println!("  Allergens: {}", status.allergen_count);
            println!("  Cart lines: {}", status.cart_line_count);
            println!("  Suggestions: {}", status.suggestion_count);
            println!("  Flavor allergens: {}", status.flavor_allergen_count);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Prints rows in the requested format. `empty` is printed for an empty
/// table-format listing.
fn print_list<T: Serialize>(
    rows: &[T],
    format: CliOutputFormat,
    empty: &str,
    line: impl Fn(&T) -> String,
) -> Result<(), String> {
    match format {
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(rows)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        CliOutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(rows)
                .map_err(|e| format!("YAML serialization failed: {e}"))?;
            print!("{yaml}");
        }
        CliOutputFormat::Table => {
            if rows.is_empty() {
                println!("{empty}");
            }
            for row in rows {
                println!("{}", line(row));
            }
        }
    }
    Ok(())
}
