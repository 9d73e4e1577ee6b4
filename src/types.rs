//! Core Types - Parameter kinds, values, and descriptors
//!
//! The foundation of the crate: every query parameter is declared through a
//! [`Descriptor`] (name + kind + default) and travels through the system as a
//! [`ParamValue`].
//!
//! - `ParamKind` - The three supported parameter shapes (string, number, array)
//! - `ParamValue` - A typed value with ergonomic `From` conversions
//! - `Descriptor` - Validated (name, kind, default) declaration
//! - `DescriptorError` / `DecodeError` - Configuration and parse failures
//!
//! # Example
//!
//! ```ignore
//! use spark_query::{Descriptor, ParamValue};
//!
//! // Typed constructors cannot produce a kind/default mismatch
//! let page = Descriptor::number("page", 1.0);
//! let status = Descriptor::array("status", Vec::new());
//!
//! // The general constructor validates at creation time
//! let bad = Descriptor::new("page", spark_query::ParamKind::Number, ParamValue::from("one"));
//! assert!(bad.is_err());
//! ```

use std::fmt;

use thiserror::Error;

// =============================================================================
// PARAMETER KIND
// =============================================================================

/// The shape of a query parameter.
///
/// Determines how raw query-string entries are decoded and how typed values
/// are encoded back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// A single text value (`q=iphone`).
    String,
    /// A single numeric value (`page=2`), carried as `f64`.
    Number,
    /// An ordered sequence of text values (`status=SENT&status=QUOTED`).
    Array,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::String => write!(f, "string"),
            ParamKind::Number => write!(f, "number"),
            ParamKind::Array => write!(f, "array"),
        }
    }
}

// =============================================================================
// PARAMETER VALUE
// =============================================================================

/// A typed parameter value.
///
/// No `Eq`: numbers are `f64`. Equality follows `f64` semantics, so `NaN`
/// values never compare equal (they also count as empty, see
/// [`ParamValue::is_empty`]).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Array(Vec<String>),
}

impl ParamValue {
    /// The kind this value belongs to.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::String(_) => ParamKind::String,
            ParamValue::Number(_) => ParamKind::Number,
            ParamValue::Array(_) => ParamKind::Array,
        }
    }

    /// True when the value carries no information for the URL.
    ///
    /// Empty values are omitted by the encoder and never seeded into the
    /// query string: the empty string, `0`/`NaN` numbers, and empty arrays.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::String(s) => s.is_empty(),
            ParamValue::Number(n) => *n == 0.0 || n.is_nan(),
            ParamValue::Array(items) => items.is_empty(),
        }
    }

    /// Borrow the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the elements, if this is an array value.
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            ParamValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Consume into the string content, if this is a string value.
    pub fn into_string(self) -> Option<String> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Consume into the elements, if this is an array value.
    pub fn into_array(self) -> Option<Vec<String>> {
        match self {
            ParamValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<usize> for ParamValue {
    fn from(n: usize) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::Array(items)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::Array(items.into_iter().map(str::to_string).collect())
    }
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Declaration of a query parameter: name, kind, and default value.
///
/// The fields are private so a constructed descriptor always satisfies
/// `default.kind() == kind`. Use the typed constructors
/// ([`Descriptor::string`], [`Descriptor::number`], [`Descriptor::array`])
/// when the kind is known at the call site; use [`Descriptor::new`] for
/// dynamic construction, which validates at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    name: String,
    kind: ParamKind,
    default: ParamValue,
}

impl Descriptor {
    /// Create a descriptor, validating the (kind, default) pair and the name.
    ///
    /// Fails before any decode or encode can run: a mismatched configuration
    /// is a programming error, not a runtime URL condition.
    pub fn new(
        name: impl Into<String>,
        kind: ParamKind,
        default: impl Into<ParamValue>,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        let default = default.into();

        if name.is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if default.kind() != kind {
            return Err(DescriptorError::KindMismatch {
                name,
                kind,
                default: default.kind(),
            });
        }

        Ok(Self {
            name,
            kind,
            default,
        })
    }

    /// String parameter. The name is used verbatim as the query key.
    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::String,
            default: ParamValue::String(default.into()),
        }
    }

    /// Number parameter. The name is used verbatim as the query key.
    pub fn number(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Number,
            default: ParamValue::Number(default),
        }
    }

    /// Array parameter. The name is used verbatim as the query key.
    pub fn array(name: impl Into<String>, default: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Array,
            default: ParamValue::Array(default),
        }
    }

    /// The query key this descriptor reads and writes.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared kind.
    #[inline]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The declared default, returned when the parameter is absent.
    #[inline]
    pub fn default(&self) -> &ParamValue {
        &self.default
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Invalid descriptor configuration, reported at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    /// The declared kind and the default value's kind disagree.
    #[error("parameter `{name}`: declared as {kind} but default is {default}")]
    KindMismatch {
        name: String,
        kind: ParamKind,
        default: ParamKind,
    },

    /// The parameter name is empty.
    #[error("parameter name must not be empty")]
    EmptyName,
}

/// A raw query value that cannot be decoded as the declared kind.
///
/// Only the strict decode path ([`crate::codec::try_decode`]) surfaces this;
/// the lenient path falls back to the descriptor default instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The raw text is not a parseable number.
    #[error("parameter `{name}`: `{raw}` is not a number")]
    InvalidNumber { name: String, raw: String },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert_eq!(ParamValue::from("x").kind(), ParamKind::String);
        assert_eq!(ParamValue::from(2.0).kind(), ParamKind::Number);
        assert_eq!(ParamValue::from(vec!["a"]).kind(), ParamKind::Array);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(
            ParamValue::from("hello"),
            ParamValue::String("hello".to_string())
        );
        assert_eq!(ParamValue::from(3i32), ParamValue::Number(3.0));
        assert_eq!(ParamValue::from(3i64), ParamValue::Number(3.0));
        assert_eq!(ParamValue::from(3usize), ParamValue::Number(3.0));
        assert_eq!(
            ParamValue::from(vec!["a", "b"]),
            ParamValue::Array(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_is_empty_rule() {
        assert!(ParamValue::from("").is_empty());
        assert!(ParamValue::from(0.0).is_empty());
        assert!(ParamValue::Number(f64::NAN).is_empty());
        assert!(ParamValue::Array(Vec::new()).is_empty());

        assert!(!ParamValue::from("x").is_empty());
        assert!(!ParamValue::from(1.0).is_empty());
        assert!(!ParamValue::from(-1.0).is_empty());
        assert!(!ParamValue::from(vec![""]).is_empty()); // non-empty array, empty element
    }

    #[test]
    fn test_accessors() {
        let v = ParamValue::from("abc");
        assert_eq!(v.as_str(), Some("abc"));
        assert_eq!(v.as_number(), None);
        assert_eq!(v.clone().into_string(), Some("abc".to_string()));

        let n = ParamValue::from(2.5);
        assert_eq!(n.as_number(), Some(2.5));
        assert_eq!(n.as_str(), None);

        let a = ParamValue::from(vec!["x", "y"]);
        assert_eq!(a.as_array().map(|s| s.len()), Some(2));
        assert_eq!(a.into_array(), Some(vec!["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn test_typed_constructors() {
        let page = Descriptor::number("page", 1.0);
        assert_eq!(page.name(), "page");
        assert_eq!(page.kind(), ParamKind::Number);
        assert_eq!(page.default(), &ParamValue::Number(1.0));

        let q = Descriptor::string("q", "");
        assert_eq!(q.kind(), ParamKind::String);
        assert!(q.default().is_empty());

        let status = Descriptor::array("status", vec!["SENT".to_string()]);
        assert_eq!(status.kind(), ParamKind::Array);
    }

    #[test]
    fn test_new_validates_kind_mismatch() {
        let err = Descriptor::new("page", ParamKind::Number, "one").unwrap_err();
        assert_eq!(
            err,
            DescriptorError::KindMismatch {
                name: "page".to_string(),
                kind: ParamKind::Number,
                default: ParamKind::String,
            }
        );

        // Message names the parameter and both kinds
        let msg = err.to_string();
        assert!(msg.contains("page"));
        assert!(msg.contains("number"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn test_new_validates_name() {
        let err = Descriptor::new("", ParamKind::String, "x").unwrap_err();
        assert_eq!(err, DescriptorError::EmptyName);
    }

    #[test]
    fn test_new_accepts_matching_pair() {
        let d = Descriptor::new("size", ParamKind::Number, 20.0).unwrap();
        assert_eq!(d.kind(), ParamKind::Number);
        assert_eq!(d.default(), &ParamValue::Number(20.0));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ParamKind::String.to_string(), "string");
        assert_eq!(ParamKind::Number.to_string(), "number");
        assert_eq!(ParamKind::Array.to_string(), "array");
    }
}
