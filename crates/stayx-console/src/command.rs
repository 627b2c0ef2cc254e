//! Canonical command forms
//!
//! Both grammars converge on [`Command`]: the space-delimited surface parses
//! straight into it, and the dotted-call surface is rewritten into a canonical
//! line first. Validation and execution therefore live on a single path.

use stayx_core::{AttrValue, ClassName};

/// A parsed canonical command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Construct, register, and persist a new default entity; print its id
    Create { class: ClassName },

    /// Print the string form of one entity
    Show { class: ClassName, id: String },

    /// Remove one entity from the registry and persist
    Destroy { class: ClassName, id: String },

    /// Print the string form of every entity, optionally filtered by class
    All { class: Option<ClassName> },

    /// Print the number of entities of a class
    ///
    /// A missing or unrecognized class prints `0`, so the token is resolved
    /// leniently at parse time.
    Count { class: Option<ClassName> },

    /// Set attributes on one entity and persist
    ///
    /// The payload stays raw here: instance existence is checked before the
    /// payload is parsed, so parsing happens at execution time.
    Update {
        class: ClassName,
        id: String,
        payload: String,
    },

    /// Print usage for a command, or the command list
    Help { topic: Option<String> },

    /// Leave the shell
    Quit,
}

/// A parsed update payload
///
/// Produced from the raw payload only after the target instance is known to
/// exist.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePayload {
    /// `<attr> <value>` form, value already coerced
    Pair { attr: String, value: AttrValue },

    /// `{...}` form, applied pair-by-pair through the generic setter
    Dict(Vec<(String, AttrValue)>),
}
