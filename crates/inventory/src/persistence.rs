//! JSON file persistence for [`InventoryStore`].
//!
//! The file is a flat object: item name -> integer quantity. Each call opens,
//! uses and closes its own handle. Writes are not atomic.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use stockbook_core::{DomainError, ItemName};

use crate::store::InventoryStore;

/// Data file used when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "inventory.json";

/// Message for callers to report when a load finds no data file.
pub const NO_DATA_FILE_MESSAGE: &str = "No inventory data file found. Starting fresh.";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access inventory file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed inventory file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid inventory data in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

/// What a successful [`InventoryStore::load`] found.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store was replaced with `items` entries from the file.
    Loaded { items: usize },
    /// No file at the path; the store was left untouched.
    NoDataFile,
}

impl InventoryStore {
    /// Build a store from `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, LoadOutcome), PersistenceError> {
        let mut store = Self::new();
        let outcome = store.load(path)?;
        Ok((store, outcome))
    }

    /// Replace the entire store with the contents of `path`.
    ///
    /// A missing file is not an error: the store is left as it was and
    /// [`LoadOutcome::NoDataFile`] is returned. Any other failure leaves the
    /// store unchanged and is returned as a [`PersistenceError`].
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome, PersistenceError> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(f) => f,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %path.display(),
                    "no inventory data file; store left unchanged"
                );
                return Ok(LoadOutcome::NoDataFile);
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let raw: BTreeMap<String, u64> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| PersistenceError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let mut stock = BTreeMap::new();
        for (item, qty) in raw {
            let item = ItemName::new(item).map_err(|source| PersistenceError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
            if qty == 0 {
                tracing::warn!(item = %item, "dropping zero-quantity entry from data file");
                continue;
            }
            stock.insert(item.into_inner(), qty);
        }

        let items = stock.len();
        self.replace(stock);
        tracing::info!(path = %path.display(), items, "inventory loaded");
        Ok(LoadOutcome::Loaded { items })
    }

    /// Write the store to `path` as 2-space indented JSON, overwriting it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let io_err = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self.as_map())
            .map_err(|err| io_err(err.into()))?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        tracing::info!(path = %path.display(), items = self.len(), "inventory saved");
        Ok(())
    }
}
