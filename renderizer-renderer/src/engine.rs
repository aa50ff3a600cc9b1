//! minijinja wrapper — [`MissingKey`] policy and [`TemplateEngine`].
//!
//! # Missing-key policies
//!
//! | Policy    | Undefined behaviour | `{{ absent }}` | `{{ absent.field }}` |
//! |-----------|---------------------|----------------|----------------------|
//! | `error`   | strict              | execute error  | execute error        |
//! | `zero`    | chainable           | empty          | empty                |
//! | `default` | lenient             | empty          | execute error        |
//! | `invalid` | lenient             | empty          | execute error        |

use std::fmt;
use std::str::FromStr;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// MissingKey
// ---------------------------------------------------------------------------

/// What happens when a template references a key absent from the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissingKey {
    Default,
    Zero,
    #[default]
    Error,
    Invalid,
}

impl MissingKey {
    /// All policies in a stable order.
    pub fn all() -> &'static [MissingKey] {
        &[
            MissingKey::Default,
            MissingKey::Zero,
            MissingKey::Error,
            MissingKey::Invalid,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissingKey::Default => "default",
            MissingKey::Zero => "zero",
            MissingKey::Error => "error",
            MissingKey::Invalid => "invalid",
        }
    }

    /// Parse `value`, resetting anything unrecognised to [`MissingKey::Error`] with a warning.
    pub fn parse_or_reset(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: String| {
            tracing::warn!("{err}; resetting to 'error'");
            MissingKey::Error
        })
    }

    pub fn undefined_behavior(&self) -> UndefinedBehavior {
        match self {
            MissingKey::Error => UndefinedBehavior::Strict,
            MissingKey::Zero => UndefinedBehavior::Chainable,
            MissingKey::Default | MissingKey::Invalid => UndefinedBehavior::Lenient,
        }
    }
}

impl FromStr for MissingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissingKey::all()
            .iter()
            .copied()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| {
                format!("invalid missing-key policy '{s}'; expected: default, zero, error, invalid")
            })
    }
}

impl fmt::Display for MissingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Parses and executes one template at a time under a fixed [`MissingKey`] policy.
///
/// Output is plain text; auto-escaping is off regardless of the template name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine {
    policy: MissingKey,
}

impl TemplateEngine {
    pub fn new(policy: MissingKey) -> Self {
        TemplateEngine { policy }
    }

    pub fn policy(&self) -> MissingKey {
        self.policy
    }

    /// Parse `source` as template `name`, then render it against `ctx`.
    ///
    /// The two stages fail with distinct [`RenderError`] variants.
    pub fn render_str(
        &self,
        name: &str,
        source: &str,
        ctx: &minijinja::Value,
    ) -> Result<String, RenderError> {
        let env = self.environment();
        let template = env
            .template_from_named_str(name, source)
            .map_err(|e| RenderError::Parse {
                name: name.to_string(),
                source: e,
            })?;
        template.render(ctx).map_err(|e| RenderError::Execute {
            name: name.to_string(),
            source: e,
        })
    }

    fn environment<'s>(&self) -> Environment<'s> {
        let mut env = Environment::new();
        env.set_undefined_behavior(self.policy.undefined_behavior());
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
