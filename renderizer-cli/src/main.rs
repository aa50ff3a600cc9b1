//! renderizer — render templates against a context built from the command
//! line, YAML settings, and the environment.
//!
//! # Usage
//!
//! ```text
//! renderizer [options] [--name[.path]=value ...] [template ...]
//!
//! renderizer --name=world hello.txt.tmpl          # {{ Name }} -> world
//! renderizer -C --name=world hello.txt.tmpl       # {{ name }} -> world
//! renderizer --item=a --item=b list.tmpl          # {{ Item }} -> [a, b]
//! renderizer -S base.yaml -S extra.yaml page.html
//! echo '{{ env.HOME }}' | renderizer
//! ```
//!
//! Exit status is the bitwise OR of every template's failure code
//! (1 open, 2 read, 4 parse, 8 execute, 15 fault), or 1 when no template
//! could be resolved or the settings could not be loaded.

mod argv;
mod commands;
mod discover;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use commands::render::RenderArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "renderizer",
    version,
    about = "Template renderer",
    override_usage = "renderizer [options] [--name[.path]=value ...] [template ...]",
    disable_version_flag = true,
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_tracing(args: &RenderArgs) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let mut raw = std::env::args();
    let program = raw.next().unwrap_or_else(|| "renderizer".to_string());
    let partition = argv::partition(raw);

    let cli = Cli::parse_from(std::iter::once(program).chain(partition.options.iter().cloned()));
    init_tracing(&cli.render);
    tracing::debug!(?partition, "partitioned arguments");

    let status = cli.render.with_partition(partition).run()?;
    if !status.success() {
        std::process::exit(status.code());
    }
    Ok(())
}
