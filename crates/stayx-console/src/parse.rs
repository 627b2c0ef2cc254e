//! Canonical grammar parsing
//!
//! Lines are space-delimited with the command name first. Validation follows
//! a fixed priority order: missing class name, unrecognized class, missing
//! id, then the command-specific payload checks. Instance existence is not
//! checked here - that requires the registry and happens at execution time,
//! after the id token and before the update payload.

use stayx_core::errors::{Result, StayXError};
use stayx_core::{AttrValue, ClassName};

use crate::command::{Command, UpdatePayload};

/// Split off the first whitespace-delimited token, returning it and the rest
pub(crate) fn split_token(input: &str) -> (Option<&str>, &str) {
    let input = input.trim_start();
    if input.is_empty() {
        return (None, "");
    }
    match input.find(char::is_whitespace) {
        Some(idx) => (Some(&input[..idx]), input[idx..].trim_start()),
        None => (Some(input), ""),
    }
}

fn require_class(rest: &str) -> Result<(ClassName, &str)> {
    let (token, remainder) = split_token(rest);
    let token = token.ok_or(StayXError::ClassNameMissing)?;
    let class = ClassName::parse(token).ok_or_else(|| StayXError::UnknownClass {
        class: token.to_string(),
    })?;
    Ok((class, remainder))
}

fn require_id(rest: &str) -> Result<(String, &str)> {
    let (token, remainder) = split_token(rest);
    let token = token.ok_or(StayXError::InstanceIdMissing)?;
    Ok((token.to_string(), remainder))
}

/// Parse one canonical line into a [`Command`]
///
/// # Errors
///
/// Returns the validation error whose diagnostic the shell prints; an
/// unrecognized command name is `UnknownSyntax` (the dispatcher then tries
/// the dotted-call grammar before reporting it).
pub fn parse_line(line: &str) -> Result<Command> {
    let (head, rest) = split_token(line);
    let head = head.ok_or_else(|| StayXError::UnknownSyntax {
        line: line.to_string(),
    })?;

    match head {
        "quit" | "EOF" => Ok(Command::Quit),
        "create" => {
            let (class, _) = require_class(rest)?;
            Ok(Command::Create { class })
        }
        "show" => {
            let (class, rest) = require_class(rest)?;
            let (id, _) = require_id(rest)?;
            Ok(Command::Show { class, id })
        }
        "destroy" => {
            let (class, rest) = require_class(rest)?;
            let (id, _) = require_id(rest)?;
            Ok(Command::Destroy { class, id })
        }
        "all" => {
            let (token, _) = split_token(rest);
            let class = match token {
                None => None,
                Some(token) => Some(ClassName::parse(token).ok_or_else(|| {
                    StayXError::UnknownClass {
                        class: token.to_string(),
                    }
                })?),
            };
            Ok(Command::All { class })
        }
        "count" => {
            // a missing or unrecognized class is not an error: count prints 0
            let (token, _) = split_token(rest);
            Ok(Command::Count {
                class: token.and_then(ClassName::parse),
            })
        }
        "update" => {
            let (class, rest) = require_class(rest)?;
            let (id, payload) = require_id(rest)?;
            Ok(Command::Update {
                class,
                id,
                payload: payload.to_string(),
            })
        }
        "help" => {
            let (token, _) = split_token(rest);
            Ok(Command::Help {
                topic: token.map(str::to_string),
            })
        }
        _ => Err(StayXError::UnknownSyntax {
            line: line.to_string(),
        }),
    }
}

/// Parse an update payload, once the target instance is known to exist
///
/// `Ok(None)` means a malformed `{...}` literal: the update then has no
/// effect and prints nothing, deliberately.
///
/// # Errors
///
/// `AttributeNameMissing` for an empty payload, `ValueMissing` for a bare
/// attribute name.
pub fn parse_update_payload(raw: &str) -> Result<Option<UpdatePayload>> {
    // tolerate trailing ')' carried over from dotted-style space notation
    let payload = raw
        .trim()
        .trim_end_matches(|c: char| c == ')' || c.is_whitespace());

    if payload.starts_with('{') && payload.ends_with('}') {
        return Ok(parse_dict(payload).map(UpdatePayload::Dict));
    }
    if payload.is_empty() {
        return Err(StayXError::AttributeNameMissing);
    }
    match payload.split_once(char::is_whitespace) {
        Some((attr, value_raw)) => Ok(Some(UpdatePayload::Pair {
            attr: attr.to_string(),
            value: AttrValue::coerce(value_raw.trim_start()),
        })),
        None => Err(StayXError::ValueMissing),
    }
}

/// Parse a `{...}` literal into attribute pairs
///
/// Keys must be quoted (single or double); values are quoted strings,
/// integers, or floats. Anything else makes the whole literal malformed.
fn parse_dict(raw: &str) -> Option<Vec<(String, AttrValue)>> {
    let inner = raw.strip_prefix('{')?.strip_suffix('}')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    let mut pairs = Vec::new();
    for part in split_outside_quotes(inner, ',') {
        let (key_raw, value_raw) = part.split_once(':')?;
        let key = quoted_inner(key_raw.trim())?;
        let value = parse_literal(value_raw.trim())?;
        pairs.push((key.to_string(), value));
    }
    Some(pairs)
}

/// Split on `sep` occurrences sitting outside quoted runs
fn split_outside_quotes(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    for (idx, c) in input.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == sep => {
                parts.push(&input[start..idx]);
                start = idx + sep.len_utf8();
            }
            None => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

/// The body of a quoted token, or None if it is not quoted
fn quoted_inner(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return Some(&raw[1..raw.len() - 1]);
        }
    }
    None
}

/// A dict literal value: quoted string, integer, or float
fn parse_literal(raw: &str) -> Option<AttrValue> {
    if let Some(inner) = quoted_inner(raw) {
        return Some(AttrValue::Str(inner.to_string()));
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(AttrValue::Int(n));
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Some(AttrValue::Float(f));
        }
    }
    None
}
