//! Default template discovery.
//!
//! With no template named and no piped input, look in the working directory
//! for `<base>.<ext><suffix>`, where `base` is the directory's own name and
//! then `renderizer`. Bases and suffixes vary slowest:
//!
//! ```text
//! site.yaml.tmpl, site.json.tmpl, ... site.tmpl, site.yaml, ... site
//! renderizer.yaml.tmpl, ...                          renderizer
//! ```

use std::path::{Path, PathBuf};

const FALLBACK_BASE: &str = "renderizer";
const SUFFIXES: &[&str] = &[".tmpl", ""];
const EXTENSIONS: &[&str] = &["yaml", "json", "html", "txt", "xml", ""];

/// Candidate file names in search order.
pub fn candidates(folder_name: &str) -> Vec<String> {
    let mut bases = vec![folder_name];
    if folder_name != FALLBACK_BASE {
        bases.push(FALLBACK_BASE);
    }

    let mut names = Vec::with_capacity(bases.len() * SUFFIXES.len() * EXTENSIONS.len());
    for base in bases.into_iter().filter(|b| !b.is_empty()) {
        for suffix in SUFFIXES {
            for ext in EXTENSIONS {
                let name = if ext.is_empty() {
                    format!("{base}{suffix}")
                } else {
                    format!("{base}.{ext}{suffix}")
                };
                names.push(name);
            }
        }
    }
    names
}

/// First existing regular file among [`candidates`] for `dir`.
///
/// Returned relative to `dir`.
pub fn default_template(dir: &Path) -> Option<PathBuf> {
    let folder_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_BASE.to_string());

    let found = candidates(&folder_name)
        .into_iter()
        .find(|name| dir.join(name).is_file())
        .map(PathBuf::from);
    if let Some(name) = &found {
        tracing::info!(template = %name.display(), "using template");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn candidate_order_prefers_folder_and_tmpl_suffix() {
        let names = candidates("site");
        assert_eq!(names[0], "site.yaml.tmpl");
        assert_eq!(names[5], "site.tmpl");
        assert_eq!(names[6], "site.yaml");
        assert_eq!(names[11], "site");
        assert_eq!(names[12], "renderizer.yaml.tmpl");
        assert_eq!(names.len(), 24);
    }

    #[test]
    fn fallback_base_is_not_repeated() {
        assert_eq!(candidates("renderizer").len(), 12);
    }

    #[test]
    fn finds_first_existing_file() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("renderizer.txt"), "x").unwrap();
        std::fs::write(dir.path().join("renderizer.html.tmpl"), "x").unwrap();
        assert_eq!(
            default_template(dir.path()),
            Some(PathBuf::from("renderizer.html.tmpl"))
        );
    }

    #[test]
    fn ignores_directories_and_returns_none_when_empty() {
        let dir = TempDir::new().expect("tempdir");
        assert_eq!(default_template(dir.path()), None);
        std::fs::create_dir(dir.path().join("renderizer")).unwrap();
        assert_eq!(default_template(dir.path()), None);
    }

    #[test]
    fn folder_name_wins_over_fallback() {
        let root = TempDir::new().expect("tempdir");
        let dir = root.path().join("project");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("renderizer.yaml.tmpl"), "x").unwrap();
        std::fs::write(dir.join("project.xml"), "x").unwrap();
        assert_eq!(default_template(&dir), Some(PathBuf::from("project.xml")));
    }
}
