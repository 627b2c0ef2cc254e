//! StayX Console - the command dispatcher
//!
//! This crate turns input lines into registry operations:
//! - `parse`: the canonical space-delimited grammar, parsed into a `Command`
//! - `dotted`: the `<Class>.<command>(<args>)` surface syntax, rewritten into
//!   a canonical line and re-dispatched through the same path
//! - `console`: command execution against the `FileStore`, diagnostics, and
//!   persistence triggers
//! - `repl`: the interactive read-loop

pub mod command;
pub mod console;
pub mod dotted;
pub mod parse;
pub mod repl;

// Re-export commonly used types
pub use command::{Command, UpdatePayload};
pub use console::{Console, Outcome};
