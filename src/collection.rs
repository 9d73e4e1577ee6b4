//! Query Collection - Ordered multi-map mirroring a URL query string
//!
//! [`QueryMap`] is the in-memory form of everything after the `?` in a URL:
//! an ordered list of `(name, value)` pairs where a name may repeat. Order
//! is insertion order and survives parse/serialize, so the address bar stays
//! stable as unrelated parameters change around it.
//!
//! - `parse` / `to_query_string` - The external surface (percent-encoded)
//! - `get` / `get_all` / `contains` - Lookups (first match / all matches)
//! - `append` / `remove_all` - The mutation primitives
//!
//! # Example
//!
//! ```ignore
//! use spark_query::QueryMap;
//!
//! let map = QueryMap::parse("?status=SENT&status=QUOTED&page=2");
//! assert_eq!(map.get("page"), Some("2"));
//! assert_eq!(map.get_all("status"), vec!["SENT", "QUOTED"]);
//! assert_eq!(map.to_query_string(), "status=SENT&status=QUOTED&page=2");
//! ```

use std::fmt;

// =============================================================================
// QUERY MAP
// =============================================================================

/// Ordered multi-map of query parameters.
///
/// Values are stored decoded (plain text); percent-encoding happens only at
/// the parse/serialize boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryMap {
    pairs: Vec<(String, String)>,
}

impl QueryMap {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    // =========================================================================
    // Parse / serialize
    // =========================================================================

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Splits on `&`, then on the first `=` of each segment. A segment with
    /// no `=` becomes a flag entry with an empty value. `+` reads as a space
    /// and percent-escapes are decoded; malformed escapes degrade to the raw
    /// text rather than failing the whole parse. Empty segments (`a=1&&b=2`)
    /// are skipped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut pairs = Vec::new();
        for segment in query.split('&') {
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((name, value)) => {
                    pairs.push((decode_component(name), decode_component(value)));
                }
                None => pairs.push((decode_component(segment), String::new())),
            }
        }

        Self { pairs }
    }

    /// Serialize as a percent-encoded query string, without the leading `?`.
    ///
    /// Entries appear in stored order as `name=value`, joined with `&`.
    /// Empty values serialize as `name=`. An empty collection serializes as
    /// the empty string.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// First value under the name, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values under the name, in stored order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// True when at least one entry exists under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    /// Number of entries (repeated names count each time).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(name, value)` entries in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    // =========================================================================
    // Mutation primitives
    // =========================================================================

    /// Append one entry at the end.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Remove every entry under the name. Returns how many were removed.
    pub fn remove_all(&mut self, name: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|(n, _)| n != name);
        before - self.pairs.len()
    }
}

impl fmt::Display for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

// =============================================================================
// COMPONENT ENCODING
// =============================================================================

/// Decode one query component: `+` as space, then percent-unescaping.
/// Malformed escape sequences fall back to the raw text.
fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

// =============================================================================
// TESTS
// =============================================================================
