//! Query Codec - Typed values to raw query entries and back
//!
//! Pure conversion layer between [`ParamValue`] and the raw strings that
//! appear in a query string. No I/O and no percent-encoding here: raw
//! strings are the already-decoded text form, the escaping lives in
//! [`crate::collection`].
//!
//! - `encode` - Typed value to zero-or-more raw entries
//! - `decode` - Lenient read: absent or malformed input yields the default
//! - `try_decode` - Strict read: malformed numbers are a typed error
//!
//! Empty scalars (the empty string, `0`, `NaN`) encode to nothing, so a
//! cleared filter disappears from the URL instead of lingering as `q=`.
//! That is the one lossy corner of the round-trip: an omitted value decodes
//! back as the descriptor default, not as the original empty scalar.

use crate::types::{DecodeError, Descriptor, ParamKind, ParamValue};

// =============================================================================
// ENCODE
// =============================================================================

/// Encode a typed value as raw query entries, in order.
///
/// - Strings and numbers yield one entry, or none when the value is empty
///   (see [`ParamValue::is_empty`]).
/// - Arrays yield one entry per element; elements pass through verbatim,
///   including empty ones.
///
/// Numbers with an integral value print without a decimal point (`3`, not
/// `3.0`), matching what a hand-written URL would contain.
pub fn encode(value: &ParamValue) -> Vec<String> {
    match value {
        ParamValue::String(s) => {
            if s.is_empty() {
                Vec::new()
            } else {
                vec![s.clone()]
            }
        }
        ParamValue::Number(n) => {
            if value.is_empty() {
                Vec::new()
            } else {
                vec![format_number(*n)]
            }
        }
        ParamValue::Array(items) => items.clone(),
    }
}

/// Render a number the way it reads in an address bar.
///
/// Integral values below 2^53 (the largest range where f64 holds exact
/// integers) print as integers; everything else uses the shortest float
/// representation.
fn format_number(n: f64) -> String {
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    if n.is_finite() && n.fract() == 0.0 && n.abs() < EXACT_INT_LIMIT {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// =============================================================================
// DECODE
// =============================================================================

/// Decode raw query entries as the descriptor's kind, leniently.
///
/// - Absent input (no entries) yields the descriptor default.
/// - String: the first entry wins; extra entries are ignored.
/// - Number: the first entry is parsed as `f64`; malformed text falls back
///   to the default with a logged warning.
/// - Array: all entries, in order.
pub fn decode(raws: &[String], descriptor: &Descriptor) -> ParamValue {
    match try_decode(raws, descriptor) {
        Ok(value) => value,
        Err(DecodeError::InvalidNumber { name, raw }) => {
            log::warn!("query parameter `{}`: ignoring non-numeric value `{}`", name, raw);
            descriptor.default().clone()
        }
    }
}

/// Decode raw query entries as the descriptor's kind, strictly.
///
/// Same shape as [`decode`], except a malformed number is returned as
/// [`DecodeError::InvalidNumber`] instead of degrading to the default.
/// Absent input is still the default, not an error.
pub fn try_decode(raws: &[String], descriptor: &Descriptor) -> Result<ParamValue, DecodeError> {
    match descriptor.kind() {
        ParamKind::String => Ok(match raws.first() {
            Some(raw) => ParamValue::String(raw.clone()),
            None => descriptor.default().clone(),
        }),
        ParamKind::Number => match raws.first() {
            Some(raw) => match raw.parse::<f64>() {
                Ok(n) => Ok(ParamValue::Number(n)),
                Err(_) => Err(DecodeError::InvalidNumber {
                    name: descriptor.name().to_string(),
                    raw: raw.clone(),
                }),
            },
            None => Ok(descriptor.default().clone()),
        },
        ParamKind::Array => {
            if raws.is_empty() {
                Ok(descriptor.default().clone())
            } else {
                Ok(ParamValue::Array(raws.to_vec()))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
