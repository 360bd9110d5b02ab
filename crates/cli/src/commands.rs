use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;

use stockroom_inventory::{Inventory, Product};

use crate::config::Config;
use crate::{render, shell};

type Result = anyhow::Result<()>;

/// Build the inventory from the configured data file.
///
/// A missing data file is not an error: the session starts empty.
fn open(config: &Config) -> anyhow::Result<Inventory> {
    let mut inventory = if config.history {
        Inventory::new()
    } else {
        Inventory::without_history()
    };

    if config.data_file.exists() {
        inventory.load_from_file(&config.data_file)?;
    } else {
        tracing::warn!(
            path = %config.data_file.display(),
            "data file not found, starting with an empty inventory"
        );
    }
    Ok(inventory)
}

fn persist(config: &Config, inventory: &Inventory) -> Result {
    if let Some(parent) = config.data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory {}", parent.display()))?;
    }
    inventory.save_to_file(&config.data_file)?;
    Ok(())
}

/// `stockroom list [--low-stock] [--json]`
pub fn list(config: &Config, low_stock: bool, json: bool) -> Result {
    let inventory = open(config)?;
    let products = if low_stock {
        inventory.get_low_stock_products()
    } else {
        inventory.list_all_products()
    };

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &products)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render::product_table(&products))?;
    }
    Ok(())
}

/// `stockroom add <sku> <name> <quantity> [--supplier ID]`
pub fn add(config: &Config, sku: &str, name: String, quantity: i64, supplier: String) -> Result {
    let mut inventory = open(config)?;
    inventory.add_product(Product::create(sku, name, quantity, supplier)?)?;
    persist(config, &inventory)?;
    println!("added {sku}");
    Ok(())
}

/// `stockroom adjust <sku> <amount>`
pub fn adjust(config: &Config, sku: &str, amount: i64) -> Result {
    let mut inventory = open(config)?;
    inventory.adjust_product_stock(sku, amount)?;
    persist(config, &inventory)?;

    if let Some(product) = inventory.product(sku) {
        let flag = if product.is_low_stock() { " (low stock)" } else { "" };
        println!("{sku} now at {}{flag}", product.quantity());
    }
    Ok(())
}

/// `stockroom delete <sku>`
pub fn delete(config: &Config, sku: &str) -> Result {
    let mut inventory = open(config)?;
    inventory.delete_product(sku)?;
    persist(config, &inventory)?;
    println!("deleted {sku}");
    Ok(())
}

/// `stockroom import <source>`
pub fn import(config: &Config, source: &Path) -> Result {
    let mut inventory = open(config)?;
    let count = inventory.load_from_file(source)?;
    persist(config, &inventory)?;
    println!(
        "imported {count} products from {} into {}",
        source.display(),
        config.data_file.display()
    );
    Ok(())
}

/// `stockroom export <target>`
pub fn export(config: &Config, target: &Path) -> Result {
    let inventory = open(config)?;
    inventory.save_to_file(target)?;
    println!("exported {} products to {}", inventory.len(), target.display());
    Ok(())
}

/// `stockroom shell`
pub fn run_shell(config: &Config) -> Result {
    let mut inventory = open(config)?;
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    shell::run(&mut inventory, &config.data_file, stdin, stdout)
}
