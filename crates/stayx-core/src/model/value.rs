use serde::{Deserialize, Serialize};

/// Tagged value variant for the open attribute bag
///
/// Attributes hold strings, integers, or floats. Serde is untagged so values
/// persist as plain JSON scalars: integral numbers deserialize as `Int`,
/// other numbers as `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    /// Coerce a raw update token into a value
    ///
    /// Rules, in order:
    /// 1. purely ASCII-digit input becomes `Int`
    /// 2. input parsing as a finite `f64` becomes `Float`
    /// 3. otherwise matching single or double quotes are stripped and the
    ///    value is kept as text
    pub fn coerce(raw: &str) -> AttrValue {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return AttrValue::Int(n);
            }
        }
        if let Ok(f) = raw.parse::<f64>() {
            // non-finite floats are not representable in the JSON store
            if f.is_finite() {
                return AttrValue::Float(f);
            }
        }
        AttrValue::Str(unquote(raw).to_string())
    }
}

/// Strip one pair of matching single or double quotes, if present
pub fn unquote(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}
