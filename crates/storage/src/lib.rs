//! Storage abstraction and implementations for vidqc.
//!
//! This crate provides a trait-based storage interface with a JSON file
//! reference implementation and nearest-neighbour search over embeddings.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod row;
pub mod vector;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use row::project_row;
