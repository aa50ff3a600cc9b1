//! YAML settings files.
//!
//! # Discovery
//!
//! With no `--settings` given, the loader looks for `.<stem>.yaml` in the
//! working directory, where `<stem>` comes from the first template:
//!
//! ```text
//! site.html.tmpl  ->  .site.yaml
//! .hidden.txt     ->  .hidden.yaml
//! (stdin)         ->  .renderizer.yaml
//! ```
//!
//! A missing discovered file is fine. A missing *explicit* file is fatal.
//!
//! # Merge
//!
//! Files load in order. Each is typed with [`type_mapping`] and then folded
//! with [`merge_filling`], so the first file to set a leaf wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, ContextError};
use crate::merge::merge_filling;
use crate::typer::type_mapping;
use crate::value::{Mapping, Value};

/// Stem used when no template file names the settings file.
pub const FALLBACK_STEM: &str = "renderizer";

/// Where the settings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// Files named on the command line or in `$RENDERIZER`. All must exist.
    Explicit(Vec<PathBuf>),
    /// The synthesized `.<stem>.yaml`. Tolerated when absent.
    Discovered(PathBuf),
}

impl SettingsSource {
    /// Pick explicit files when any were given, otherwise discover from `first_template`.
    pub fn resolve(explicit: Vec<PathBuf>, first_template: Option<&Path>) -> Self {
        if explicit.is_empty() {
            SettingsSource::Discovered(default_settings_path(first_template))
        } else {
            SettingsSource::Explicit(explicit)
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        match self {
            SettingsSource::Explicit(paths) => paths,
            SettingsSource::Discovered(path) => std::slice::from_ref(path),
        }
    }
}

/// File name without leading dots, cut at the first remaining dot.
pub fn template_stem(template: &Path) -> String {
    let name = template
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let trimmed = name.trim_start_matches('.');
    let stem = trimmed.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

/// `.<stem>.yaml`, relative to the working directory.
pub fn default_settings_path(first_template: Option<&Path>) -> PathBuf {
    let stem = first_template.map_or_else(|| FALLBACK_STEM.to_string(), template_stem);
    PathBuf::from(format!(".{stem}.yaml"))
}

/// Load, type, and merge every file of `source`.
pub fn load_settings(source: &SettingsSource) -> Result<Mapping, ContextError> {
    let tolerate_missing = matches!(source, SettingsSource::Discovered(_));
    let mut merged = Mapping::new();

    for path in source.paths() {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if tolerate_missing && e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no default settings file");
                continue;
            }
            Err(e) => return Err(io_err(path, e)),
        };

        let loaded = parse_settings(path, &contents)?;
        tracing::info!(path = %path.display(), keys = loaded.len(), "using settings");
        tracing::debug!(path = %path.display(), loaded = ?loaded, "loaded settings");
        merge_filling(&mut merged, loaded);
    }

    Ok(merged)
}

/// Decode one YAML document into a typed mapping.
///
/// An empty document is an empty mapping. Any other non-mapping is an error.
pub fn parse_settings(path: &Path, contents: &str) -> Result<Mapping, ContextError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(contents).map_err(|e| ContextError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut mapping = match Value::from(yaml) {
        Value::Map(m) => m,
        Value::Null => Mapping::new(),
        _ => {
            return Err(ContextError::NotAMapping {
                path: path.to_path_buf(),
            })
        }
    };
    type_mapping(&mut mapping);
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    #[test]
    fn stem_strips_leading_dots_and_extensions() {
        assert_eq!(template_stem(Path::new("site.html.tmpl")), "site");
        assert_eq!(template_stem(Path::new("dir/.hidden.txt")), "hidden");
        assert_eq!(template_stem(Path::new("plain")), "plain");
        assert_eq!(template_stem(Path::new("...")), FALLBACK_STEM);
    }

    #[test]
    fn default_path_uses_first_template_or_fallback() {
        assert_eq!(
            default_settings_path(Some(Path::new("a/b/config.yaml.tmpl"))),
            PathBuf::from(".config.yaml")
        );
        assert_eq!(default_settings_path(None), PathBuf::from(".renderizer.yaml"));
    }

    #[test]
    fn resolve_prefers_explicit_files() {
        let src = SettingsSource::resolve(vec![PathBuf::from("x.yaml")], Some(Path::new("t.txt")));
        assert_eq!(src, SettingsSource::Explicit(vec![PathBuf::from("x.yaml")]));
        let src = SettingsSource::resolve(vec![], Some(Path::new("t.txt")));
        assert_eq!(src, SettingsSource::Discovered(PathBuf::from(".t.yaml")));
    }

    #[test]
    fn parse_types_string_leaves() {
        let map = parse_settings(Path::new("s.yaml"), "port: '8080'\nname: web\n").unwrap();
        assert_eq!(map["port"], Value::Scalar(Scalar::Int(8080)));
        assert_eq!(map["name"], Value::string("web"));
    }

    #[test]
    fn empty_document_is_empty_mapping() {
        assert!(parse_settings(Path::new("s.yaml"), "").unwrap().is_empty());
        assert!(parse_settings(Path::new("s.yaml"), "# only a comment\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn sequence_document_is_rejected() {
        let err = parse_settings(Path::new("s.yaml"), "- a\n- b\n").unwrap_err();
        assert!(matches!(err, ContextError::NotAMapping { .. }), "got: {err}");
    }
}
