//! StayX Core - domain models and shared facilities
//!
//! This crate provides the foundational pieces of the StayX shell:
//! - The `Entity` model: identity, timestamps, and an open attribute bag
//! - The closed `ClassName` registry of recognized entity classes
//! - The `AttrValue` tagged value variant with the update coercion rules
//! - The console error taxonomy with its fixed diagnostic lines
//! - The logging facility

pub mod errors;
pub mod logging;
pub mod model;

// Re-export commonly used types
pub use errors::{Result, StayXError};
pub use model::{AttrValue, ClassName, Entity};
