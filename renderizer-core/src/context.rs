//! Global context assembly.
//!
//! Precedence, highest first:
//!
//! 1. the environment, under its single key;
//! 2. command-line assignments;
//! 3. settings files (fill gaps only).

use serde::Serialize;

use crate::environment::{inject_environment, EnvMap};
use crate::merge::{merge_appending, merge_filling, unwrap_singletons};
use crate::path::{parse_token, Token};
use crate::value::{Mapping, Value};

// ---------------------------------------------------------------------------
// Assignment fold
// ---------------------------------------------------------------------------

/// Accumulator of the left-to-right fold over assignment tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentFold {
    /// Folded assignments. Leaves are still sequences at this point.
    pub mapping: Mapping,
    /// Capitalization state after the last token.
    pub capitalize: bool,
}

/// Fold assignment tokens in order, carrying the capitalization toggle.
///
/// A toggle only affects tokens after it. Empty tokens are skipped.
pub fn fold_assignments<I, S>(tokens: I, capitalize: bool) -> AssignmentFold
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let init = AssignmentFold {
        mapping: Mapping::new(),
        capitalize,
    };
    tokens
        .into_iter()
        .enumerate()
        .fold(init, |mut acc, (index, raw)| {
            let raw = raw.as_ref();
            if raw.is_empty() {
                return acc;
            }
            match parse_token(raw, acc.capitalize) {
                Token::ToggleCapitalization => {
                    acc.capitalize = !acc.capitalize;
                    tracing::info!(capitalize = acc.capitalize, "capitalization toggled");
                }
                Token::Assignment(assignment) => {
                    tracing::debug!(
                        index,
                        name = %assignment.dotted(),
                        value = %assignment.value,
                        "assignment"
                    );
                    merge_appending(&mut acc.mapping, assignment.into_mapping());
                }
            }
            acc
        })
}

// ---------------------------------------------------------------------------
// GlobalContext
// ---------------------------------------------------------------------------

/// The merged mapping handed to every template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlobalContext(Mapping);

impl GlobalContext {
    /// Build from command-line assignment tokens.
    ///
    /// Paths assigned once read as scalars; repeated paths keep every value
    /// in order as a sequence.
    pub fn from_assignments<I, S>(tokens: I, capitalize: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let AssignmentFold { mut mapping, .. } = fold_assignments(tokens, capitalize);
        unwrap_singletons(&mut mapping);
        GlobalContext(mapping)
    }

    /// Add settings values at every path the command line left unset.
    pub fn fill_from_settings(&mut self, settings: Mapping) {
        merge_filling(&mut self.0, settings);
    }

    /// Insert the environment under `key`, replacing any existing value.
    pub fn inject_environment(&mut self, key: &str, vars: EnvMap) {
        inject_environment(&mut self.0, key, vars);
    }

    /// Look up a dotted path such as `db.host`.
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        let mut segments = dotted.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn into_mapping(self) -> Mapping {
        self.0
    }
}

impl From<Mapping> for GlobalContext {
    fn from(m: Mapping) -> Self {
        GlobalContext(m)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    fn int(i: i64) -> Value {
        Value::Scalar(Scalar::Int(i))
    }

    #[test]
    fn repeated_assignment_appends() {
        let ctx = GlobalContext::from_assignments(["--a.b=1", "--a.b=2"], false);
        assert_eq!(ctx.get("a.b"), Some(&Value::Seq(vec![int(1), int(2)])));
    }

    #[test]
    fn single_assignment_reads_as_scalar() {
        let ctx = GlobalContext::from_assignments(["--name=value"], true);
        assert_eq!(ctx.get("Name"), Some(&Value::string("value")));
    }

    #[test]
    fn toggle_only_affects_later_tokens() {
        let ctx = GlobalContext::from_assignments(["--first=1", "-C", "--second=2"], true);
        assert_eq!(ctx.get("First"), Some(&int(1)));
        assert_eq!(ctx.get("second"), Some(&int(2)));
        assert!(ctx.get("Second").is_none());
    }

    #[test]
    fn toggle_twice_restores_capitalization() {
        let fold = fold_assignments(["-c", "--x=1", "-c", "--y=2"], true);
        assert!(fold.capitalize);
        assert!(fold.mapping.contains_key("x"));
        assert!(fold.mapping.contains_key("Y"));
    }

    #[test]
    fn repeated_bare_flags_append() {
        let t = Value::Scalar(Scalar::Bool(true));
        let ctx = GlobalContext::from_assignments(["--verbose", "--verbose"], false);
        assert_eq!(ctx.get("verbose"), Some(&Value::Seq(vec![t.clone(), t])));
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let ctx = GlobalContext::from_assignments(["", "--a=1"], false);
        assert_eq!(ctx.as_mapping().len(), 1);
    }

    #[test]
    fn settings_fill_gaps_but_never_override() {
        let mut ctx = GlobalContext::from_assignments(["--db.host=cli"], false);
        let settings = crate::settings::parse_settings(
            std::path::Path::new("s.yaml"),
            "db:\n  host: file\n  port: 5432\ntitle: hello\n",
        )
        .unwrap();
        ctx.fill_from_settings(settings);
        assert_eq!(ctx.get("db.host"), Some(&Value::string("cli")));
        assert_eq!(ctx.get("db.port"), Some(&int(5432)));
        assert_eq!(ctx.get("title"), Some(&Value::string("hello")));
    }

    #[test]
    fn environment_overrides_cli_at_its_key() {
        let mut ctx = GlobalContext::from_assignments(["--env=cli"], false);
        let mut vars = EnvMap::new();
        vars.insert("USER".into(), "alice".into());
        ctx.inject_environment("env", vars);
        assert_eq!(ctx.get("env.USER"), Some(&Value::string("alice")));
    }

    #[test]
    fn get_rejects_paths_through_scalars() {
        let ctx = GlobalContext::from_assignments(["--a=1"], false);
        assert!(ctx.get("a.b").is_none());
        assert!(ctx.get("missing").is_none());
    }
}
