//! Process environment capture.

use std::collections::BTreeMap;
use std::ffi::OsString;

use crate::value::{Mapping, Value};

/// Key the environment lands under unless configured otherwise.
pub const DEFAULT_ENV_KEY: &str = "env";

/// Flat `NAME -> VALUE` snapshot of the environment. Values stay strings.
pub type EnvMap = BTreeMap<String, String>;

/// Snapshot the current process environment.
///
/// Non-UTF-8 names or values are converted lossily rather than dropped.
pub fn capture_environment() -> EnvMap {
    collect_vars(std::env::vars_os())
}

/// Build an [`EnvMap`] from raw `(name, value)` pairs.
pub fn collect_vars<I>(vars: I) -> EnvMap
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

/// Decide the key to inject under, if any.
///
/// Injection happens when a key is configured or when no template file was
/// named at all. An empty key in the second case falls back to
/// [`DEFAULT_ENV_KEY`].
pub fn injection_key(configured: &str, has_template_files: bool) -> Option<&str> {
    if !configured.is_empty() {
        Some(configured)
    } else if !has_template_files {
        Some(DEFAULT_ENV_KEY)
    } else {
        None
    }
}

/// Insert `vars` under `key`, replacing whatever was there.
pub fn inject_environment(ctx: &mut Mapping, key: &str, vars: EnvMap) {
    let map: Mapping = vars
        .into_iter()
        .map(|(name, value)| (name, Value::string(value)))
        .collect();
    if ctx.insert(key.to_string(), Value::Map(map)).is_some() {
        tracing::debug!(key, "environment replaced an existing context key");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    #[test]
    fn injection_key_rules() {
        assert_eq!(injection_key("env", true), Some("env"));
        assert_eq!(injection_key("vars", false), Some("vars"));
        assert_eq!(injection_key("", false), Some(DEFAULT_ENV_KEY));
        assert_eq!(injection_key("", true), None);
    }

    #[test]
    fn injected_values_stay_strings_and_overwrite() {
        let mut ctx = Mapping::new();
        ctx.insert("env".into(), Value::Scalar(Scalar::Int(1)));
        let vars = collect_vars([
            (OsString::from("USER"), OsString::from("alice")),
            (OsString::from("PORT"), OsString::from("8080")),
        ]);
        inject_environment(&mut ctx, "env", vars);
        let env = ctx["env"].as_mapping().expect("env mapping");
        assert_eq!(env["USER"], Value::string("alice"));
        assert_eq!(env["PORT"], Value::string("8080"));
    }

    #[test]
    fn capture_sees_process_environment() {
        let vars = capture_environment();
        assert_eq!(vars.len(), std::env::vars_os().count());
    }
}
