//! Scalar type inference over loosely typed text.
//!
//! [`type_value`] picks the most specific of bool, int, float, or string a
//! piece of text unambiguously represents. [`type_mapping`] applies it to
//! every string leaf of a nested mapping.

use crate::value::{Mapping, Scalar, Value};

/// Infer a [`Scalar`] from `text`.
///
/// Order: `true`/`false` (any case), then a decimal `i64`, then a finite
/// `f64`. Anything else stays a string. Parsing is not locale-aware.
pub fn type_value(text: &str) -> Scalar {
    if text.eq_ignore_ascii_case("true") {
        return Scalar::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Scalar::Bool(false);
    }
    if let Ok(i) = text.parse::<i64>() {
        return Scalar::Int(i);
    }
    // `inf`, `nan`, `infinity` parse as floats but are words in a template context.
    match text.parse::<f64>() {
        Ok(x) if x.is_finite() => Scalar::Float(x),
        _ => Scalar::String(text.to_string()),
    }
}

/// Re-type a single value in place. Only string leaves change.
pub fn type_in_place(value: &mut Value) {
    match value {
        Value::Scalar(Scalar::String(s)) => {
            let typed = type_value(s);
            *value = Value::Scalar(typed);
        }
        Value::Seq(items) => items.iter_mut().for_each(type_in_place),
        Value::Map(map) => type_mapping(map),
        Value::Null | Value::Scalar(_) => {}
    }
}

/// Recursively type every leaf of `map`.
///
/// Key sets and sequence lengths are untouched. Idempotent: typing twice
/// yields the same mapping as typing once.
pub fn type_mapping(map: &mut Mapping) {
    map.values_mut().for_each(type_in_place);
}
