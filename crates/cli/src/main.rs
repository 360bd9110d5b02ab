//! `stockroom` command-line front end.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use stockroom_inventory::{DomainError, InventoryError};

mod commands;
mod config;
mod render;
mod shell;

use config::Config;

/// stockroom: track products, stock levels and low-stock items.
///
/// The inventory is read from the data file at start-up; commands that change
/// it write it back.
#[derive(Parser)]
#[command(name = "stockroom", version, about, long_about = None)]
struct Cli {
    /// Inventory table (.csv, .tsv or .xlsx). Defaults to $STOCKROOM_DATA_FILE,
    /// then data/inventory.csv.
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Do not keep undo/redo snapshots (also $STOCKROOM_NO_HISTORY=1).
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show products as a table.
    List {
        /// Only products at or below the low-stock threshold.
        #[arg(short, long)]
        low_stock: bool,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Add a new product.
    Add {
        /// SKU in the form ABC-1234.
        sku: String,

        /// Product name.
        name: String,

        /// Initial quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Supplier reference.
        #[arg(short, long, default_value = "")]
        supplier: String,
    },

    /// Change a product's stock level by a signed amount.
    Adjust {
        sku: String,

        /// Amount to add (negative to remove).
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Delete a product.
    Delete { sku: String },

    /// Replace the inventory with the contents of another table file.
    Import { source: PathBuf },

    /// Write the inventory to another table file (format from its extension).
    Export { target: PathBuf },

    /// Interactive session with undo/redo.
    Shell,
}

fn main() {
    stockroom_observability::init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.file, cli.no_history);
    tracing::debug!(
        data_file = %config.data_file.display(),
        history = config.history,
        "configuration resolved"
    );

    let result = match cli.command {
        Commands::List { low_stock, json } => commands::list(&config, low_stock, json),
        Commands::Add {
            sku,
            name,
            quantity,
            supplier,
        } => commands::add(&config, &sku, name, quantity, supplier),
        Commands::Adjust { sku, amount } => commands::adjust(&config, &sku, amount),
        Commands::Delete { sku } => commands::delete(&config, &sku),
        Commands::Import { source } => commands::import(&config, &source),
        Commands::Export { target } => commands::export(&config, &target),
        Commands::Shell => commands::run_shell(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {}", user_message(&e));
        process::exit(1);
    }
}

fn user_message(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<InventoryError>() {
        render::describe_error(e)
    } else if let Some(e) = err.downcast_ref::<DomainError>() {
        render::describe_domain(e)
    } else {
        format!("{err:#}")
    }
}
