//! Dotted field paths
//!
//! A path is split once into borrowed segments and consumed by slicing, so the
//! schema that owns the path string is never touched.

use serde_json::Value;

/// Split a dotted field into its segments
pub fn segments(field: &str) -> Vec<&str> {
    field.split('.').collect()
}

/// Outcome of resolving the first segment of a path against a container
#[derive(Debug, PartialEq)]
pub enum Resolution<'v, 'p> {
    /// The first segment is not an own key of the container
    Absent,
    /// More segments remain below `key`
    Branch {
        key: &'p str,
        value: &'v Value,
        rest: &'p [&'p str],
    },
    /// `key` is the last segment
    Leaf { key: &'p str, value: &'v Value },
}

/// Parse a segment as an array index.
///
/// Only canonical decimal indices count, so `"01"` and `"-1"` are not indices.
pub fn index(segment: &str) -> Option<usize> {
    segment
        .parse::<usize>()
        .ok()
        .filter(|index| index.to_string() == segment)
}

fn own<'v>(container: &'v Value, key: &str) -> Option<&'v Value> {
    match container {
        Value::Object(object) => object.get(key),
        Value::Array(items) => index(key).and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Resolve the first segment of `path` against `container`.
///
/// Objects own their keys and arrays own their in-bounds indices; scalars
/// resolve as absent.
pub fn resolve<'v, 'p>(container: &'v Value, path: &'p [&'p str]) -> Resolution<'v, 'p> {
    let Some((&key, rest)) = path.split_first() else {
        return Resolution::Absent;
    };
    let Some(value) = own(container, key) else {
        return Resolution::Absent;
    };
    if rest.is_empty() {
        Resolution::Leaf { key, value }
    } else {
        Resolution::Branch { key, value, rest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segments() {
        assert_eq!(segments("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(segments("pet"), vec!["pet"]);
    }

    #[test]
    fn test_resolve_leaf() {
        let data = json!({"pet": {"name": "Li"}});
        let path = segments("pet");
        assert_eq!(
            resolve(&data, &path),
            Resolution::Leaf { key: "pet", value: &data["pet"] }
        );
    }

    #[test]
    fn test_resolve_branch_keeps_remainder() {
        let data = json!({"computer": {"favorite": {}}});
        let path = segments("computer.favorite");
        match resolve(&data, &path) {
            Resolution::Branch { key, value, rest } => {
                assert_eq!(key, "computer");
                assert_eq!(value, &data["computer"]);
                assert_eq!(rest, &["favorite"]);
            }
            other => panic!("Expected Branch, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_absent() {
        let data = json!({"name": "Doms"});
        let path = segments("pet.name");
        assert_eq!(resolve(&data, &path), Resolution::Absent);
        assert_eq!(resolve(&json!([1, 2]), &segments("2")), Resolution::Absent);
        assert_eq!(resolve(&json!([1, 2]), &segments("01")), Resolution::Absent);
        assert_eq!(resolve(&json!("text"), &segments("len")), Resolution::Absent);
    }

    #[test]
    fn test_resolve_array_index() {
        let data = json!([{"x": 1}, {"x": 2}]);
        assert_eq!(
            resolve(&data, &segments("1")),
            Resolution::Leaf { key: "1", value: &data[1] }
        );
        assert!(matches!(
            resolve(&data, &segments("0.x")),
            Resolution::Branch { key: "0", rest: ["x"], .. }
        ));
        assert_eq!(index("3"), Some(3));
        assert_eq!(index("-1"), None);
        assert_eq!(index("+1"), None);
    }

    #[test]
    fn test_null_value_is_present() {
        let data = json!({"pet": null});
        let path = segments("pet");
        assert!(matches!(resolve(&data, &path), Resolution::Leaf { .. }));
    }
}
