//! renderizer core library — context resolution.
//!
//! Turns command-line assignments, YAML settings, and the process
//! environment into one nested mapping:
//!
//! - [`typer`] — scalar inference and recursive typing
//! - [`path`] — `--a.b.c=value` tokens to single-branch mappings
//! - [`merge`] — the appending and filling merge strategies
//! - [`settings`] — settings discovery and loading
//! - [`environment`] — environment capture and injection
//! - [`context`] — [`GlobalContext`] assembly

pub mod context;
pub mod environment;
pub mod error;
pub mod merge;
pub mod path;
pub mod settings;
pub mod typer;
pub mod value;

pub use context::{fold_assignments, AssignmentFold, GlobalContext};
pub use environment::{capture_environment, injection_key, EnvMap, DEFAULT_ENV_KEY};
pub use error::ContextError;
pub use settings::{load_settings, SettingsSource};
pub use typer::{type_mapping, type_value};
pub use value::{Mapping, Scalar, Value};
