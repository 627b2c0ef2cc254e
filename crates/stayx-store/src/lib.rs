//! StayX Store - flat-file JSON persistence for the entity registry
//!
//! Provides:
//! - `FileStore`: the in-memory registry of live entities keyed by
//!   `<ClassName>.<id>`
//! - Whole-file JSON save/reload, with save and reload exact inverses for
//!   every entity that round-trips

pub mod errors;
pub mod file_store;

pub use errors::{Result, StoreError};
pub use file_store::FileStore;
