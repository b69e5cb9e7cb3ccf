//! # Storage Layer
//!
//! This module defines the storage abstraction for todo. The [`DataStore`] trait
//! is a generic key-value store over one record type, so the same code backs the
//! task and the category collections.
//!
//! ## Snapshot Model
//!
//! The in-memory mapping is the single source of truth while the process runs:
//!
//! 1. **Load**: the backing file is read once, when the store is opened.
//! 2. **Operate**: every read and write touches memory only.
//! 3. **Flush**: [`DataStore::close`] serializes the whole collection and replaces
//!    the backing file in one go.
//!
//! Changes made after the last flush are lost if the process dies without
//! closing its stores.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one JSON array per collection
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.config/todo/
//! ├── tasks.json        # JSON array of tasks
//! ├── categories.json   # JSON array of categories
//! └── config.json       # Configuration
//! ```

use crate::error::Result;
use crate::model::{Record, RecordId};

pub mod fs;
pub mod memory;

/// Abstract interface for one collection of records.
///
/// Keys are record ids. Implementations keep everything in memory and only
/// persist on [`close`](DataStore::close).
pub trait DataStore<T: Record> {
    /// Insert or overwrite the record stored under `id`
    fn save_item(&mut self, id: RecordId, item: T) -> Result<()>;

    /// Remove the record stored under `id`. Absent ids are a no-op.
    fn remove_item(&mut self, id: RecordId) -> Result<()>;

    /// Get a record by id
    fn get_item(&self, id: RecordId) -> Result<T>;

    /// All records currently held. Callers must not rely on the order.
    fn get_items(&self) -> Vec<T>;

    /// Number of records currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist the current state, replacing whatever was stored before
    fn close(&mut self) -> Result<()>;
}
