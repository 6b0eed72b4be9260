//! Subcommand implementations.
//!
//! Domain failures (bad quantity, unknown item, missing data file) are
//! reported on `out` and the command still succeeds. Persistence failures are
//! returned as errors.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use stockbook_core::{DomainError, Quantity};
use stockbook_inventory::{InventoryStore, LoadOutcome, NO_DATA_FILE_MESSAGE, StockLog};

fn report_domain_error<W: Write>(out: &mut W, err: &DomainError) -> Result<()> {
    match err {
        DomainError::NotFound(item) => writeln!(out, "Item '{item}' not found in inventory.")?,
        DomainError::Validation(msg) => writeln!(out, "Invalid input: {msg}.")?,
    }
    Ok(())
}

fn open_store<W: Write>(out: &mut W, path: &Path) -> Result<InventoryStore> {
    let (store, outcome) = InventoryStore::open(path)
        .with_context(|| format!("failed to load inventory from {}", path.display()))?;
    if outcome == LoadOutcome::NoDataFile {
        writeln!(out, "{NO_DATA_FILE_MESSAGE}")?;
    }
    Ok(store)
}

fn save_store(store: &InventoryStore, path: &Path) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("failed to save inventory to {}", path.display()))
}

pub fn add<W: Write>(out: &mut W, path: &Path, item: &str, qty: &str) -> Result<()> {
    let qty: Quantity = match qty.parse() {
        Ok(q) => q,
        Err(err) => return report_domain_error(out, &err),
    };

    let mut store = open_store(out, path)?;
    let mut log = StockLog::new();
    match store.add(item, qty, Some(&mut log)) {
        Ok(Some(_)) => save_store(&store, path)?,
        Ok(None) => return Ok(()),
        Err(err) => return report_domain_error(out, &err),
    }

    for entry in &log {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

pub fn remove<W: Write>(out: &mut W, path: &Path, item: &str, qty: &str) -> Result<()> {
    let qty: Quantity = match qty.parse() {
        Ok(q) => q,
        Err(err) => return report_domain_error(out, &err),
    };

    let mut store = open_store(out, path)?;
    match store.remove(item, qty) {
        Ok(remaining) => {
            save_store(&store, path)?;
            writeln!(out, "{item} stock: {remaining}")?;
        }
        Err(err) => report_domain_error(out, &err)?,
    }
    Ok(())
}

pub fn quantity<W: Write>(out: &mut W, path: &Path, item: &str) -> Result<()> {
    let store = open_store(out, path)?;
    writeln!(out, "{item} stock: {}", store.quantity(item))?;
    Ok(())
}

fn write_low_items<W: Write>(out: &mut W, store: &InventoryStore, threshold: u64) -> Result<()> {
    let low = store.low_items(threshold);
    if low.is_empty() {
        writeln!(out, "Low items: (none)")?;
    } else {
        writeln!(out, "Low items: {}", low.join(", "))?;
    }
    Ok(())
}

pub fn low<W: Write>(out: &mut W, path: &Path, threshold: u64) -> Result<()> {
    let store = open_store(out, path)?;
    write_low_items(out, &store, threshold)
}

pub fn report<W: Write>(out: &mut W, path: &Path) -> Result<()> {
    let store = open_store(out, path)?;
    store.write_report(out)?;
    Ok(())
}

/// Walk through the basic operations against `path`, starting from an empty
/// store and overwriting whatever the file held.
pub fn demo<W: Write>(out: &mut W, path: &Path, threshold: u64) -> Result<()> {
    let mut store = InventoryStore::new();

    for (item, qty) in [("apple", 10), ("banana", 2)] {
        if let Err(err) = store.add(item, Quantity::new(qty), None) {
            report_domain_error(out, &err)?;
        }
    }
    for (item, qty) in [("apple", 3), ("orange", 1)] {
        if let Err(err) = store.remove(item, Quantity::new(qty)) {
            report_domain_error(out, &err)?;
        }
    }

    writeln!(out, "Apple stock: {}", store.quantity("apple"))?;
    write_low_items(out, &store, threshold)?;

    save_store(&store, path)?;
    let store = open_store(out, path)?;
    store.write_report(out)?;
    Ok(())
}
