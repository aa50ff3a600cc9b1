//! Deep-merge strategies.
//!
//! Two strategies, never mixed:
//!
//! | Strategy            | Used for               | Sequence on both sides | Scalar on both sides |
//! |---------------------|------------------------|------------------------|----------------------|
//! | [`merge_appending`] | folding CLI assignments | concatenate            | keep existing        |
//! | [`merge_filling`]   | settings files, gaps    | keep existing          | keep existing        |
//!
//! Both recurse into mappings present on both sides and add keys missing
//! from the accumulator. When the two sides have different shapes the
//! accumulator wins.

use crate::value::{Mapping, Value};

/// Fold `incoming` into `acc`, concatenating sequences that collide.
///
/// `--a.b=1 --a.b=2` therefore yields `a.b = [1, 2]`.
pub fn merge_appending(acc: &mut Mapping, incoming: Mapping) {
    for (key, value) in incoming {
        match acc.get_mut(&key) {
            None => {
                acc.insert(key, value);
            }
            Some(Value::Map(existing)) => match value {
                Value::Map(inner) => merge_appending(existing, inner),
                other => shape_conflict(&key, "mapping", &other),
            },
            Some(Value::Seq(existing)) => match value {
                Value::Seq(items) => existing.extend(items),
                other => shape_conflict(&key, "sequence", &other),
            },
            Some(existing) => shape_conflict(&key, existing.kind(), &value),
        }
    }
}

/// Fill gaps in `acc` from `incoming`. Existing leaves are never replaced.
pub fn merge_filling(acc: &mut Mapping, incoming: Mapping) {
    for (key, value) in incoming {
        match acc.get_mut(&key) {
            None => {
                acc.insert(key, value);
            }
            Some(Value::Map(existing)) => {
                if let Value::Map(inner) = value {
                    merge_filling(existing, inner);
                }
            }
            Some(_) => {}
        }
    }
}

/// Replace every one-element sequence with its only element, recursively.
///
/// Applied to the folded CLI mapping, so a path assigned once reads as a
/// scalar while a repeated path stays a sequence.
pub fn unwrap_singletons(map: &mut Mapping) {
    for value in map.values_mut() {
        unwrap_value(value);
    }
}

fn unwrap_value(value: &mut Value) {
    match value {
        Value::Seq(items) if items.len() == 1 => {
            let mut only = items.remove(0);
            unwrap_value(&mut only);
            *value = only;
        }
        Value::Seq(items) => items.iter_mut().for_each(unwrap_value),
        Value::Map(inner) => unwrap_singletons(inner),
        Value::Null | Value::Scalar(_) => {}
    }
}

fn shape_conflict(key: &str, existing: &str, incoming: &Value) {
    tracing::debug!(
        key,
        existing,
        incoming = incoming.kind(),
        "conflicting shapes in assignment; keeping the earlier value"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    fn int(i: i64) -> Value {
        Value::Scalar(Scalar::Int(i))
    }

    fn map(entries: Vec<(&str, Value)>) -> Mapping {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn appending_concatenates_sequences() {
        let mut acc = map(vec![("a", Value::Map(map(vec![("b", Value::Seq(vec![int(1)]))])))]);
        merge_appending(
            &mut acc,
            map(vec![("a", Value::Map(map(vec![("b", Value::Seq(vec![int(2)]))])))]),
        );
        let b = &acc["a"].as_mapping().unwrap()["b"];
        assert_eq!(b, &Value::Seq(vec![int(1), int(2)]));
    }

    #[test]
    fn appending_adds_sibling_keys() {
        let mut acc = map(vec![("a", Value::Map(map(vec![("b", Value::Seq(vec![int(1)]))])))]);
        merge_appending(
            &mut acc,
            map(vec![("a", Value::Map(map(vec![("c", Value::Seq(vec![int(2)]))])))]),
        );
        let a = acc["a"].as_mapping().unwrap();
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn appending_keeps_earlier_value_on_shape_conflict() {
        let mut acc = map(vec![("a", Value::Seq(vec![int(1)]))]);
        merge_appending(
            &mut acc,
            map(vec![("a", Value::Map(map(vec![("b", Value::Seq(vec![int(2)]))])))]),
        );
        assert_eq!(acc["a"], Value::Seq(vec![int(1)]));
    }

    #[test]
    fn filling_never_overwrites_and_never_appends() {
        let mut acc = map(vec![
            ("name", Value::string("cli")),
            ("list", Value::Seq(vec![int(1)])),
        ]);
        merge_filling(
            &mut acc,
            map(vec![
                ("name", Value::string("settings")),
                ("list", Value::Seq(vec![int(2), int(3)])),
                ("extra", int(4)),
            ]),
        );
        assert_eq!(acc["name"], Value::string("cli"));
        assert_eq!(acc["list"], Value::Seq(vec![int(1)]));
        assert_eq!(acc["extra"], int(4));
    }

    #[test]
    fn filling_recurses_into_nested_mappings() {
        let mut acc = map(vec![("db", Value::Map(map(vec![("host", Value::string("a"))])))]);
        merge_filling(
            &mut acc,
            map(vec![(
                "db",
                Value::Map(map(vec![("host", Value::string("b")), ("port", int(5432))])),
            )]),
        );
        let db = acc["db"].as_mapping().unwrap();
        assert_eq!(db["host"], Value::string("a"));
        assert_eq!(db["port"], int(5432));
    }

    #[test]
    fn unwraps_only_single_element_sequences() {
        let mut acc = map(vec![
            ("one", Value::Seq(vec![int(1)])),
            ("two", Value::Seq(vec![int(1), int(2)])),
            ("nested", Value::Map(map(vec![("x", Value::Seq(vec![int(3)]))]))),
        ]);
        unwrap_singletons(&mut acc);
        assert_eq!(acc["one"], int(1));
        assert_eq!(acc["two"], Value::Seq(vec![int(1), int(2)]));
        assert_eq!(acc["nested"].as_mapping().unwrap()["x"], int(3));
    }
}
