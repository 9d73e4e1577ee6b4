//! Parameter Store Adapter - Single-parameter access over a query collection
//!
//! Bridges one named parameter and the whole [`QueryMap`], hiding the
//! scalar-vs-repeated difference from the layers above:
//!
//! - `read_param` - The raw entries one descriptor cares about
//! - `write_param` - A new collection with the parameter fully replaced
//!
//! Writes are copy-on-write. The input map is never touched, so a store
//! holding the previous snapshot can compare old and new collections to
//! detect change.

use crate::collection::QueryMap;
use crate::types::ParamKind;

// =============================================================================
// READ
// =============================================================================

/// Read the raw entries for a named parameter.
///
/// Scalar kinds (string, number) see at most the first entry under the
/// name; extra entries under the same name are invisible to them. The array
/// kind sees every entry, in collection order.
pub fn read_param(map: &QueryMap, name: &str, kind: ParamKind) -> Vec<String> {
    match kind {
        ParamKind::Array => map
            .get_all(name)
            .into_iter()
            .map(str::to_string)
            .collect(),
        ParamKind::String | ParamKind::Number => {
            map.get(name).into_iter().map(str::to_string).collect()
        }
    }
}

// =============================================================================
// WRITE
// =============================================================================

/// Produce a new collection with the named parameter replaced.
///
/// Clones the input, removes every entry under the name, then appends the
/// new entries in order at the end. Unrelated entries keep their relative
/// order. An empty `raws` slice therefore deletes the parameter outright.
///
/// Writing twice is idempotent: each write replaces everything the previous
/// one put there, so entries never accumulate.
pub fn write_param(map: &QueryMap, name: &str, raws: &[String]) -> QueryMap {
    let mut next = map.clone();
    next.remove_all(name);
    for raw in raws {
        next.append(name, raw.clone());
    }
    next
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_read_scalar_takes_first() {
        let map = QueryMap::parse("page=2&page=9");
        assert_eq!(read_param(&map, "page", ParamKind::Number), raws(&["2"]));
        assert_eq!(read_param(&map, "page", ParamKind::String), raws(&["2"]));
    }

    #[test]
    fn test_read_array_takes_all_in_order() {
        let map = QueryMap::parse("status=SENT&page=2&status=QUOTED");
        assert_eq!(
            read_param(&map, "status", ParamKind::Array),
            raws(&["SENT", "QUOTED"])
        );
    }

    #[test]
    fn test_read_absent() {
        let map = QueryMap::parse("page=2");
        assert!(read_param(&map, "q", ParamKind::String).is_empty());
        assert!(read_param(&map, "status", ParamKind::Array).is_empty());
    }

    #[test]
    fn test_write_replaces_all_entries() {
        let map = QueryMap::parse("status=SENT&status=QUOTED");
        let next = write_param(&map, "status", &raws(&["DELIVERED"]));
        assert_eq!(next.to_query_string(), "status=DELIVERED");

        // Writing twice leaves exactly one entry, not an accumulation
        let again = write_param(&next, "status", &raws(&["SENT"]));
        assert_eq!(again.get_all("status"), vec!["SENT"]);
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn test_write_preserves_unrelated_order() {
        let map = QueryMap::parse("size=5&page=2");
        let next = write_param(&map, "page", &raws(&["3"]));
        assert_eq!(next.get("page"), Some("3"));
        assert_eq!(next.get("size"), Some("5"));
        // The rewritten parameter moves to the end; "size" stays put
        assert_eq!(next.to_query_string(), "size=5&page=3");
    }

    #[test]
    fn test_write_multi_value() {
        let map = QueryMap::new();
        let next = write_param(&map, "status", &raws(&["SENT", "QUOTED"]));
        assert_eq!(next.to_query_string(), "status=SENT&status=QUOTED");
    }

    #[test]
    fn test_write_empty_deletes() {
        let map = QueryMap::parse("q=iphone&page=2");
        let next = write_param(&map, "q", &[]);
        assert!(!next.contains("q"));
        assert_eq!(next.to_query_string(), "page=2");
    }

    #[test]
    fn test_write_never_mutates_input() {
        let map = QueryMap::parse("size=5&page=2");
        let before = map.clone();

        let _ = write_param(&map, "page", &raws(&["3"]));
        let _ = write_param(&map, "size", &[]);

        assert_eq!(map, before, "input collection must be left untouched");
    }
}
