use std::collections::BTreeMap;
use std::io::{self, Write};

use chrono::Utc;

use stockbook_core::{DomainError, DomainResult, Quantity};

use crate::log::{StockLog, StockLogEntry};

/// Threshold used by [`InventoryStore::low_items_default`].
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

/// Item-to-quantity mapping.
///
/// Invariant: every stored quantity is positive. `add` never creates a zero
/// entry and `remove` deletes any entry it would drive to zero or below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    stock: BTreeMap<String, u64>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` units of `item`, creating the entry if absent.
    ///
    /// An empty `item` is a no-op and returns `Ok(None)`. Otherwise returns the
    /// new stock level and, when `log` is given, appends an entry to it.
    pub fn add(
        &mut self,
        item: &str,
        qty: Quantity,
        log: Option<&mut StockLog>,
    ) -> DomainResult<Option<u64>> {
        if item.is_empty() {
            tracing::debug!("ignoring add with empty item name");
            return Ok(None);
        }

        let current = self.quantity(item);
        let updated = current.checked_add(qty.get()).ok_or_else(|| {
            DomainError::validation(format!("stock for '{item}' would overflow"))
        })?;

        if !qty.is_zero() {
            self.stock.insert(item.to_string(), updated);
        }
        tracing::debug!(item, added = qty.get(), stock = updated, "stock added");

        if let Some(log) = log {
            log.push(StockLogEntry {
                at: Utc::now(),
                item: item.to_string(),
                quantity: qty,
            });
        }

        Ok(Some(updated))
    }

    /// Remove `qty` units of `item`, returning what is left.
    ///
    /// Fails with [`DomainError::NotFound`] when the item is not stocked. An
    /// entry that would reach zero or less is deleted and `0` is returned.
    pub fn remove(&mut self, item: &str, qty: Quantity) -> DomainResult<u64> {
        let Some(current) = self.stock.get_mut(item) else {
            return Err(DomainError::not_found(item));
        };

        let remaining = current.saturating_sub(qty.get());
        if remaining == 0 {
            self.stock.remove(item);
            tracing::debug!(item, removed = qty.get(), "stock depleted; entry deleted");
        } else {
            *current = remaining;
            tracing::debug!(item, removed = qty.get(), stock = remaining, "stock removed");
        }

        Ok(remaining)
    }

    /// Stored quantity for `item`, or `0` if absent.
    pub fn quantity(&self, item: &str) -> u64 {
        self.stock.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.stock.contains_key(item)
    }

    /// Items whose quantity is strictly below `threshold`, in store order.
    pub fn low_items(&self, threshold: u64) -> Vec<&str> {
        self.stock
            .iter()
            .filter(|(_, qty)| **qty < threshold)
            .map(|(item, _)| item.as_str())
            .collect()
    }

    pub fn low_items_default(&self) -> Vec<&str> {
        self.low_items(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.stock.iter().map(|(item, qty)| (item.as_str(), *qty))
    }

    /// Replace the whole mapping. Zero quantities are dropped.
    pub fn replace(&mut self, stock: BTreeMap<String, u64>) {
        self.stock = stock;
        self.stock.retain(|_, qty| *qty > 0);
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.stock
    }

    pub fn report(&self) -> Report<'_> {
        Report { store: self }
    }

    /// Write the items report to `out`.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.report())
    }

    /// Write the items report to standard output.
    pub fn print_report(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_report(&mut lock)?;
        lock.flush()
    }
}

impl FromIterator<(String, u64)> for InventoryStore {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<(String, u64)> for InventoryStore {
    fn extend<I: IntoIterator<Item = (String, u64)>>(&mut self, iter: I) {
        for (item, qty) in iter {
            if item.is_empty() || qty == 0 {
                continue;
            }
            let entry = self.stock.entry(item).or_insert(0);
            *entry = entry.saturating_add(qty);
        }
    }
}

/// Human-readable listing of every item, one per line.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    store: &'a InventoryStore,
}

impl core::fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Items Report")?;
        for (item, qty) in self.store.iter() {
            writeln!(f, "{item} -> {qty}")?;
        }
        Ok(())
    }
}
