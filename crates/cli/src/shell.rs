//! Interactive session: one inventory kept in memory across many commands,
//! with undo/redo.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use stockroom_inventory::{DomainError, Inventory, InventoryError, Product};

use crate::render;

/// Placeholder for an empty supplier id in `add`.
const NO_SUPPLIER: &str = "-";

const HELP: &str = "\
commands:
  list                                  show every product
  low                                   show low-stock products
  add <sku> <quantity> <supplier> <name...>
                                        supplier '-' for none; name is the rest of the line
  adjust <sku> <amount>                 amount may be negative
  delete <sku>
  undo | redo
  load [path]                           replace the inventory from a table file
  save [path]                           write the inventory to a table file
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    List,
    Low,
    Add {
        sku: String,
        quantity: i64,
        supplier_id: String,
        name: String,
    },
    Adjust {
        sku: String,
        amount: i64,
    },
    Delete {
        sku: String,
    },
    Undo,
    Redo,
    Load(Option<PathBuf>),
    Save(Option<PathBuf>),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. `Ok(None)` for blank lines.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("list" | "ls", []) => ShellCommand::List,
            ("low", []) => ShellCommand::Low,
            ("add", _) => match leading_words::<4>(line) {
                Some(([_, sku, quantity, supplier_id], name)) if !name.trim().is_empty() => {
                    ShellCommand::Add {
                        sku: sku.to_string(),
                        quantity: parse_number("quantity", quantity)?,
                        supplier_id: match supplier_id {
                            NO_SUPPLIER => String::new(),
                            other => other.to_string(),
                        },
                        name: name.to_string(),
                    }
                }
                _ => return Err("wrong arguments for 'add' (try 'help')".to_string()),
            },
            ("adjust", [sku, amount]) => ShellCommand::Adjust {
                sku: sku.to_string(),
                amount: parse_number("amount", amount)?,
            },
            ("delete" | "rm", [sku]) => ShellCommand::Delete {
                sku: sku.to_string(),
            },
            ("undo", []) => ShellCommand::Undo,
            ("redo", []) => ShellCommand::Redo,
            ("load", []) => ShellCommand::Load(None),
            ("load", [path]) => ShellCommand::Load(Some(PathBuf::from(*path))),
            ("save", []) => ShellCommand::Save(None),
            ("save", [path]) => ShellCommand::Save(Some(PathBuf::from(*path))),
            ("help" | "?", _) => ShellCommand::Help,
            ("quit" | "exit", []) => ShellCommand::Quit,
            (
                verb @ ("list" | "ls" | "low" | "adjust" | "delete" | "rm" | "undo"
                | "redo" | "load" | "save" | "quit" | "exit"),
                _,
            ) => return Err(format!("wrong arguments for '{verb}' (try 'help')")),
            (verb, _) => return Err(format!("unrecognised command '{verb}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Split off the first `N` whitespace-separated words; the remainder starts
/// after the whitespace that follows the last of them and keeps its spacing.
fn leading_words<const N: usize>(line: &str) -> Option<([&str; N], &str)> {
    let mut words = [""; N];
    let mut rest = line.trim_start();
    for word in &mut words {
        let end = rest.find(char::is_whitespace)?;
        *word = &rest[..end];
        rest = rest[end..].trim_start();
    }
    Some((words, rest))
}

fn parse_number(field: &str, raw: &str) -> Result<i64, String> {
    raw.parse().map_err(|_| {
        render::describe_domain(&DomainError::validation(format!(
            "{field} '{raw}' is not a whole number"
        )))
    })
}

/// Drive a session until `quit` or end of input.
///
/// Every failed command is reported on `output` and the session carries on.
pub fn run<R: BufRead, W: Write>(
    inventory: &mut Inventory,
    data_file: &Path,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    writeln!(
        output,
        "stockroom shell, {} products loaded ('help' for commands)",
        inventory.len()
    )?;
    let mut dirty = false;

    for line in input.lines() {
        let line = line?;
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(output, "{msg}")?;
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }

        match execute(inventory, data_file, command) {
            Ok(Outcome { message, mutated, saved }) => {
                if mutated {
                    dirty = true;
                }
                if saved {
                    dirty = false;
                }
                write!(output, "{message}")?;
            }
            Err(e) => {
                tracing::debug!(error = %e, "shell command failed");
                writeln!(output, "{}", render::describe_error(&e))?;
            }
        }
    }

    if dirty {
        writeln!(output, "unsaved changes were not written to {}", data_file.display())?;
    }
    Ok(())
}

struct Outcome {
    message: String,
    mutated: bool,
    saved: bool,
}

impl Outcome {
    fn show(message: String) -> Self {
        Self {
            message,
            mutated: false,
            saved: false,
        }
    }

    fn changed(message: String) -> Self {
        Self {
            message,
            mutated: true,
            saved: false,
        }
    }
}

fn execute(
    inventory: &mut Inventory,
    data_file: &Path,
    command: ShellCommand,
) -> Result<Outcome, InventoryError> {
    let outcome = match command {
        ShellCommand::List => Outcome::show(render::product_table(&inventory.list_all_products())),
        ShellCommand::Low => {
            Outcome::show(render::product_table(&inventory.get_low_stock_products()))
        }
        ShellCommand::Add {
            sku,
            quantity,
            supplier_id,
            name,
        } => {
            inventory.add_product(Product::create(&sku, name, quantity, supplier_id)?)?;
            Outcome::changed(format!("added {sku}\n"))
        }
        ShellCommand::Adjust { sku, amount } => {
            inventory.adjust_product_stock(&sku, amount)?;
            let quantity = inventory.product(&sku).map(Product::quantity).unwrap_or_default();
            Outcome::changed(format!("{sku} now at {quantity}\n"))
        }
        ShellCommand::Delete { sku } => {
            inventory.delete_product(&sku)?;
            Outcome::changed(format!("deleted {sku}\n"))
        }
        ShellCommand::Undo => {
            if inventory.undo() {
                Outcome::changed("undone\n".to_string())
            } else {
                Outcome::show("nothing to undo\n".to_string())
            }
        }
        ShellCommand::Redo => {
            if inventory.redo() {
                Outcome::changed("redone\n".to_string())
            } else {
                Outcome::show("nothing to redo\n".to_string())
            }
        }
        ShellCommand::Load(path) => {
            let source = path.as_deref().unwrap_or(data_file);
            let count = inventory.load_from_file(source)?;
            Outcome {
                message: format!("loaded {count} products from {}\n", source.display()),
                mutated: path.is_some(),
                saved: path.is_none(),
            }
        }
        ShellCommand::Save(path) => {
            let target = path.as_deref().unwrap_or(data_file);
            inventory.save_to_file(target)?;
            Outcome {
                message: format!("saved {} products to {}\n", inventory.len(), target.display()),
                mutated: false,
                saved: path.is_none(),
            }
        }
        ShellCommand::Help => Outcome::show(format!("{HELP}\n")),
        ShellCommand::Quit => Outcome::show(String::new()),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(inventory: &mut Inventory, data_file: &Path, script: &str) -> String {
        let mut out = Vec::new();
        run(inventory, data_file, Cursor::new(script.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_add_joins_name_words() {
        let command = ShellCommand::parse("add ABC-1234 10 SUP-1 Blue widget").unwrap();
        assert_eq!(
            command,
            Some(ShellCommand::Add {
                sku: "ABC-1234".to_string(),
                quantity: 10,
                supplier_id: "SUP-1".to_string(),
                name: "Blue widget".to_string(),
            })
        );
    }

    #[test]
    fn parse_add_keeps_name_spacing_and_allows_no_supplier() {
        let command = ShellCommand::parse("add  ABC-1234 3 -   Big   blue  widget ").unwrap();
        assert_eq!(
            command,
            Some(ShellCommand::Add {
                sku: "ABC-1234".to_string(),
                quantity: 3,
                supplier_id: String::new(),
                name: "Big   blue  widget ".to_string(),
            })
        );
        assert!(ShellCommand::parse("add ABC-1234 3 SUP-1").unwrap_err().contains("wrong arguments"));
        assert!(ShellCommand::parse("add ABC-1234 3 SUP-1   ").is_err());
    }

    #[test]
    fn added_name_is_stored_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("inventory.csv");
        let mut inventory = Inventory::new();

        session(&mut inventory, &data_file, "add ABC-1234 3 - Two  spaces\n");

        let product = inventory.product("ABC-1234").unwrap();
        assert_eq!(product.name(), "Two  spaces");
        assert!(product.supplier_id().is_blank());
    }

    #[test]
    fn parse_rejects_non_numeric_amount() {
        let err = ShellCommand::parse("adjust ABC-1234 many").unwrap_err();
        assert!(err.starts_with("Invalid input"));
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
        assert!(ShellCommand::parse("frobnicate").is_err());
        assert!(ShellCommand::parse("add ABC-1234").unwrap_err().contains("wrong arguments"));
    }

    #[test]
    fn errors_are_reported_and_session_continues() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("inventory.csv");
        let mut inventory = Inventory::new();

        let out = session(
            &mut inventory,
            &data_file,
            "add ABC-1234 10 SUP-1 Widget\n\
             add ABC-1234 3 SUP-1 Widget again\n\
             adjust ABC-1234 -15\n\
             adjust NOP-0000 1\n\
             add abc-1234 1 S lower\n\
             adjust ABC-1234 -4\n",
        );

        assert!(out.contains("Already exists"));
        assert!(out.contains("Invalid input"));
        assert!(out.contains("Not found"));
        assert!(out.contains("ABC-1234 now at 6"));
        assert!(out.contains("unsaved changes"));
        assert_eq!(inventory.product("ABC-1234").unwrap().quantity(), 6);
    }

    #[test]
    fn undo_redo_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("inventory.csv");
        let mut inventory = Inventory::new();

        let out = session(
            &mut inventory,
            &data_file,
            "add AAA-0001 1 S One\n\
             add BBB-0002 2 S Two\n\
             undo\n\
             undo\n\
             undo\n\
             redo\n\
             save\n\
             quit\n\
             add CCC-0003 3 S ignored after quit\n",
        );

        assert!(out.contains("nothing to undo"));
        assert!(!out.contains("unsaved changes"));
        assert_eq!(inventory.len(), 1);

        let mut reloaded = Inventory::new();
        reloaded.load_from_file(&data_file).unwrap();
        assert_eq!(reloaded.list_all_products().len(), 1);
        assert!(reloaded.product("AAA-0001").is_some());
    }
}
