//! Raw argv partitioning.
//!
//! `--name.path=value` assignments are free-form, so clap never sees them.
//! Each token is routed to one of three streams:
//!
//! ```text
//! --settings a.yaml --missing=zero   -> options      (handed to clap)
//! --name=x -C --list.item=1 -x       -> assignments  (order preserved)
//! page.html.tmpl other.txt           -> templates
//! ```
//!
//! Everything after a bare `--` is a template. A bare `-` means stdin.
//! A bare `version` ahead of any template is the `--version` command.

use std::path::PathBuf;

/// Long options that take a value, inline (`--opt=v`) or as the next token.
const VALUE_LONG: &[&str] = &["settings", "missing", "environment", "env"];
/// Long options without a value.
const FLAG_LONG: &[&str] = &["stdin", "debug", "debugging", "verbose", "version", "help"];
/// Short options that take a value (`-S file` or `-S=file`).
const VALUE_SHORT: &[&str] = &["S", "s", "M", "m", "E", "e"];
/// Short options without a value.
const FLAG_SHORT: &[&str] = &["D", "V", "h"];
/// Bare word accepted as a command in place of `--version`.
const VERSION_COMMAND: &str = "version";

/// Argv split into clap options, context assignments, and template paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub options: Vec<String>,
    pub assignments: Vec<String>,
    pub templates: Vec<PathBuf>,
}

/// Split `args` (without the program name).
pub fn partition<I>(args: I) -> Partition
where
    I: IntoIterator<Item = String>,
{
    let mut out = Partition::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--" {
            out.templates.extend(args.by_ref().map(PathBuf::from));
            break;
        }
        if arg == "-" {
            out.options.push("--stdin".to_string());
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            if VALUE_LONG.contains(&name) {
                let takes_next = !inline_value;
                out.options.push(arg);
                if takes_next {
                    out.options.extend(args.next());
                }
            } else if FLAG_LONG.contains(&name) && !inline_value {
                out.options.push(arg);
            } else {
                out.assignments.push(arg);
            }
        } else if let Some(short) = arg.strip_prefix('-') {
            let (name, inline_value) = match short.split_once('=') {
                Some((name, _)) => (name, true),
                None => (short, false),
            };
            if VALUE_SHORT.contains(&name) {
                let takes_next = !inline_value;
                out.options.push(arg);
                if takes_next {
                    out.options.extend(args.next());
                }
            } else if FLAG_SHORT.contains(&name) && !inline_value {
                out.options.push(arg);
            } else {
                out.assignments.push(arg);
            }
        } else if arg == VERSION_COMMAND && out.templates.is_empty() {
            out.options.push("--version".to_string());
        } else {
            out.templates.push(PathBuf::from(arg));
        }
    }

    out
}
