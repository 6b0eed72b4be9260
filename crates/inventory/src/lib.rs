//! Inventory store: item-to-quantity mapping with JSON file persistence.
//!
//! The store is an explicitly owned value; callers construct it (empty or from
//! a data file) and pass it where it is needed.

pub mod log;
pub mod persistence;
pub mod store;

pub use log::{StockLog, StockLogEntry};
pub use persistence::{
    DEFAULT_DATA_FILE, LoadOutcome, NO_DATA_FILE_MESSAGE, PersistenceError,
};
pub use store::{DEFAULT_LOW_STOCK_THRESHOLD, InventoryStore, Report};
