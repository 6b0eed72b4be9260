//! Caller-owned record of stock additions.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::Quantity;

/// One `add` call, as recorded in a [`StockLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLogEntry {
    pub at: DateTime<Utc>,
    pub item: String,
    pub quantity: Quantity,
}

impl fmt::Display for StockLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Added {} of {}", self.at, self.quantity, self.item)
    }
}

/// Ordered log entries. The store appends to it but never persists it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockLog {
    entries: Vec<StockLogEntry>,
}

impl StockLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: StockLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[StockLogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&StockLogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockLogEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a StockLog {
    type Item = &'a StockLogEntry;
    type IntoIter = core::slice::Iter<'a, StockLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
