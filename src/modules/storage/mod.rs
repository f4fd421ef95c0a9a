//! Storage module for on-disk persistence
//!
//! Provides a directory-rooted store with atomic writes, reads, removal
//! and metadata listing. Each feature owns its own store directory.

mod local_store;

pub use local_store::{ByteStream, LocalStore, StoredEntry};
