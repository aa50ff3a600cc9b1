//! Dotted-path assignments from command-line tokens.
//!
//! `--a.b.c=value` becomes the single-branch mapping `{a: {b: {c: [value]}}}`.
//! The leaf is always a one-element sequence so repeated assignments can be
//! appended by [`crate::merge::merge_appending`].

use crate::typer::type_value;
use crate::value::{Mapping, Scalar, Value};

/// What a single command-line token means to the context builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `-c` / `-C`: flip capitalization for every later token.
    ToggleCapitalization,
    /// A path assignment, already shaped as a single-branch mapping.
    Assignment(PathAssignment),
}

/// One `--name.sub=value` token, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathAssignment {
    /// Path segments after capitalization, outermost first.
    pub segments: Vec<String>,
    /// Typed value; `true` for a bare flag.
    pub value: Scalar,
}

impl PathAssignment {
    /// Dotted name as it will appear in the context.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Build the single-branch mapping, wrapping the leaf in a one-element sequence.
    ///
    /// An assignment without segments has nowhere to go and yields an empty mapping.
    pub fn into_mapping(self) -> Mapping {
        let mut segments = self.segments.into_iter();
        let Some(top) = segments.next() else {
            return Mapping::new();
        };
        let mut node = Value::Seq(vec![Value::Scalar(self.value)]);
        for segment in segments.rev() {
            let mut inner = Mapping::new();
            inner.insert(segment, node);
            node = Value::Map(inner);
        }
        let mut root = Mapping::new();
        root.insert(top, node);
        root
    }
}

/// `true` for `-c` / `-C` style tokens: one dash, `c` in either case, no `=`.
pub fn is_capitalization_toggle(raw: &str) -> bool {
    let Some(rest) = raw.strip_prefix('-') else {
        return false;
    };
    !rest.starts_with('-') && !rest.contains('=') && rest.starts_with(['c', 'C'])
}

/// Title-case one segment: first character upper, the rest lower.
pub fn capitalize_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Parse one raw token under the current capitalization state.
///
/// Never fails. A name with no usable segments (`--=x`, `--..`) degenerates
/// to a single key holding the raw name.
pub fn parse_token(raw: &str, capitalize: bool) -> Token {
    if is_capitalization_toggle(raw) {
        return Token::ToggleCapitalization;
    }

    let stripped = raw.trim_start_matches('-');
    let (name, value) = match stripped.split_once('=') {
        Some((name, value)) => (name, type_value(value)),
        None => (stripped, Scalar::Bool(true)),
    };

    let mut segments: Vec<String> = name
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if capitalize {
                capitalize_segment(s)
            } else {
                s.to_string()
            }
        })
        .collect();
    if segments.is_empty() {
        segments.push(name.to_string());
    }

    Token::Assignment(PathAssignment { segments, value })
}
