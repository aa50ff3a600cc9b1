//! `renderizer [options] [--name[.path]=value ...] [template ...]` — the render pipeline.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use renderizer_core::{
    capture_environment, injection_key, load_settings, GlobalContext, SettingsSource,
    DEFAULT_ENV_KEY,
};
use renderizer_renderer::{ExitStatus, MissingKey, RenderDriver, Target, TemplateEngine};

use crate::argv::Partition;
use crate::discover;

/// Options understood by clap. Assignments and templates come from [`Partition`].
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Load settings from these YAML files [default: .<template>.yaml]
    #[arg(
        short = 'S',
        long = "settings",
        visible_short_alias = 's',
        env = "RENDERIZER",
        value_delimiter = ',',
        value_name = "FILE"
    )]
    pub settings: Vec<PathBuf>,

    /// Missing-key policy: default, zero, error, or invalid
    #[arg(
        short = 'M',
        long = "missing",
        visible_short_alias = 'm',
        env = "RENDERIZER_MISSINGKEY",
        default_value = "error",
        value_name = "POLICY"
    )]
    pub missing: String,

    /// Load the environment under this variable name
    #[arg(
        short = 'E',
        long = "environment",
        visible_alias = "env",
        visible_short_alias = 'e',
        env = "RENDERIZER_ENVIRONMENT",
        default_value = DEFAULT_ENV_KEY,
        value_name = "NAME"
    )]
    pub environment: String,

    /// Read the template from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Debug-level logging
    #[arg(short = 'D', long = "debug", visible_alias = "debugging")]
    pub debug: bool,

    /// Info-level logging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    #[arg(skip)]
    pub assignments: Vec<String>,

    #[arg(skip)]
    pub templates: Vec<PathBuf>,
}

impl RenderArgs {
    /// Attach the assignment and template streams split off before clap ran.
    pub fn with_partition(mut self, partition: Partition) -> Self {
        self.assignments = partition.assignments;
        self.templates = partition.templates;
        self
    }

    /// Build the context, render every target, and return the aggregate status.
    ///
    /// Configuration problems are `Err`; template failures only show in the status.
    pub fn run(self) -> Result<ExitStatus> {
        let policy = MissingKey::parse_or_reset(&self.missing);
        let stdin_is_terminal = std::io::stdin().is_terminal();
        let use_stdin = self.stdin || !stdin_is_terminal;

        let templates = if self.templates.is_empty() && !use_stdin {
            let cwd = std::env::current_dir().context("could not determine working directory")?;
            vec![discovered_template(&cwd)?]
        } else {
            self.templates
        };

        let source = SettingsSource::resolve(self.settings, templates.first().map(PathBuf::as_path));
        let settings = load_settings(&source).context("failed to load settings")?;

        let mut ctx = GlobalContext::from_assignments(&self.assignments, true);
        ctx.fill_from_settings(settings);
        if let Some(key) = injection_key(&self.environment, !templates.is_empty()) {
            ctx.inject_environment(key, capture_environment());
        }
        log_context(&ctx, self.debug);

        let targets: Vec<Target> = if templates.is_empty() {
            if stdin_is_terminal {
                tracing::info!("source: stdin");
            }
            vec![Target::Stdin]
        } else {
            templates.into_iter().map(Target::File).collect()
        };

        let driver = RenderDriver::new(TemplateEngine::new(policy), &ctx);
        let status = driver.run(
            &targets,
            &mut std::io::stdin().lock(),
            &mut std::io::stdout().lock(),
        );
        tracing::debug!(status = status.code(), policy = %policy, "render finished");
        Ok(status)
    }
}

/// The default template in `dir`, or an error when none exists.
fn discovered_template(dir: &Path) -> Result<PathBuf> {
    match discover::default_template(dir) {
        Some(found) => Ok(found),
        None => bail!("missing template name"),
    }
}

fn log_context(ctx: &GlobalContext, debug: bool) {
    if !tracing::enabled!(tracing::Level::INFO) {
        return;
    }
    match serde_json::to_string_pretty(ctx) {
        Ok(json) if debug => tracing::debug!("global context: {json}"),
        Ok(json) => tracing::info!("global context: {json}"),
        Err(err) => tracing::warn!(error = %err, "could not serialize global context"),
    }
}
