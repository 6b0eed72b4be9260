//! `stockbook-core` — inventory domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no storage).

pub mod error;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use value_object::{ItemName, Quantity, ValueObject};
