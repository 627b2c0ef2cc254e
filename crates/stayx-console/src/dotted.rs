//! Dotted-call grammar
//!
//! `<Class>.<command>(<args>)` is an alternate surface for the same commands.
//! It is a pure rewriter: a dotted line becomes a canonical line which is
//! re-dispatched through the normal parse/execute path, so no validation
//! logic is duplicated. Only the diagnostics that depend on the dotted shape
//! itself (a missing class token, a `create` call, an unknown method) are
//! produced here.

use stayx_core::errors::{Result, StayXError};
use stayx_core::model::value::unquote;
use stayx_core::ClassName;

/// Rewrite a dotted-call line into a canonical command line
///
/// # Errors
///
/// Returns the diagnostic mandated for the dotted surface; anything that
/// fails to parse as `<something>.<word>(...)` is `UnknownSyntax`, echoing
/// the original line verbatim. `<Class>.create(...)` is rejected as unknown
/// syntax even though `create` is a valid canonical command.
pub fn rewrite(line: &str) -> Result<String> {
    let unknown = || StayXError::UnknownSyntax {
        line: line.to_string(),
    };

    // method calls with no class token short-circuit before general parsing
    if line == ".all()" {
        return Ok("all".to_string());
    }
    if line.starts_with(".show") || line.starts_with(".destroy") || line.starts_with(".update") {
        return Err(StayXError::ClassNameMissing);
    }

    if !line.contains('.') || !line.ends_with(')') {
        return Err(unknown());
    }
    let (class_token, rest) = line.split_once('.').ok_or_else(unknown)?;
    let (method, arg_part) = rest.split_once('(').ok_or_else(unknown)?;
    let inner = arg_part.strip_suffix(')').ok_or_else(unknown)?;

    if method == "create" {
        return Err(unknown());
    }

    // class validity is checked up front for the id-taking methods; all and
    // count handle their class token themselves (count prints 0)
    if ClassName::parse(class_token).is_none() && method != "all" && method != "count" {
        return Err(StayXError::UnknownClass {
            class: class_token.to_string(),
        });
    }

    match method {
        "all" => Ok(if class_token.is_empty() {
            "all".to_string()
        } else {
            format!("all {}", class_token)
        }),
        "count" => Ok(if class_token.is_empty() {
            "count".to_string()
        } else {
            format!("count {}", class_token)
        }),
        "show" | "destroy" => {
            let id = unquote(inner.trim());
            Ok(format!("{} {} {}", method, class_token, id))
        }
        "update" => rewrite_update(class_token, inner),
        _ => Err(unknown()),
    }
}

/// Rewrite the argument list of a dotted update call
///
/// Splits on commas at most twice, never inside a `{...}` payload: the dict
/// portion rides along as one opaque trailing argument. The canonical update
/// then checks instance existence before parsing it.
fn rewrite_update(class_token: &str, inner: &str) -> Result<String> {
    if inner.is_empty() {
        // canonical update reports the missing id
        return Ok(format!("update {}", class_token));
    }

    if let Some(brace_idx) = inner.find('{') {
        if inner.contains('}') {
            let id_token = inner[..brace_idx].trim().trim_end_matches(',').trim();
            let id = unquote(id_token);
            let dict_part = &inner[brace_idx..];
            return Ok(format!("update {} {} {}", class_token, id, dict_part));
        }
    }

    let parts: Vec<&str> = inner.splitn(3, ',').map(str::trim).collect();
    let id = unquote(parts[0]);
    match parts.len() {
        1 => Ok(format!("update {} {}", class_token, id)),
        2 => Ok(format!("update {} {} {}", class_token, id, parts[1])),
        _ => Ok(format!(
            "update {} {} {} {}",
            class_token, id, parts[1], parts[2]
        )),
    }
}
