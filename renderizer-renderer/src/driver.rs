//! Per-template render driver.
//!
//! Each [`Target`] moves through read → parse → execute and ends as a
//! [`RenderOutcome`]. Failures are logged and turned into a
//! [`FailureCode`]. The codes of all targets are OR-ed into one
//! [`ExitStatus`], so one broken template never stops the rest.
//!
//! | Stage            | Code |
//! |------------------|------|
//! | open             | 1    |
//! | read             | 2    |
//! | parse            | 4    |
//! | execute          | 8    |
//! | unexpected fault | 15   |

use std::any::Any;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use renderizer_core::GlobalContext;

use crate::engine::TemplateEngine;

// ---------------------------------------------------------------------------
// Targets and outcomes
// ---------------------------------------------------------------------------

/// Where a template's source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Stdin,
}

impl Target {
    /// Name used for diagnostics and as the engine's template name.
    pub fn name(&self) -> String {
        match self {
            Target::File(path) => path.display().to_string(),
            Target::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Stage at which a template failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCode {
    Open,
    Read,
    Parse,
    Execute,
    Fault,
}

impl FailureCode {
    /// Bit pattern contributed to the process exit status.
    pub fn code(&self) -> i32 {
        match self {
            FailureCode::Open => 1,
            FailureCode::Read => 2,
            FailureCode::Parse => 4,
            FailureCode::Execute => 8,
            FailureCode::Fault => 15,
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            FailureCode::Open => "open",
            FailureCode::Read => "read",
            FailureCode::Parse => "parse",
            FailureCode::Execute => "execute",
            FailureCode::Fault => "fault",
        };
        f.write_str(stage)
    }
}

/// Result of rendering one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Succeeded(String),
    Failed(FailureCode),
}

impl RenderOutcome {
    pub fn code(&self) -> i32 {
        match self {
            RenderOutcome::Succeeded(_) => 0,
            RenderOutcome::Failed(failure) => failure.code(),
        }
    }
}

/// Bitwise OR of every per-template code. Zero only if all succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub fn record(&mut self, code: i32) {
        self.0 |= code;
    }

    pub fn code(&self) -> i32 {
        self.0
    }

    pub fn success(&self) -> bool {
        self.0 == 0
    }
}

// ---------------------------------------------------------------------------
// RenderDriver
// ---------------------------------------------------------------------------

/// Renders targets one after another against a read-only context.
pub struct RenderDriver {
    engine: TemplateEngine,
    context: minijinja::Value,
}

impl RenderDriver {
    pub fn new(engine: TemplateEngine, context: &GlobalContext) -> Self {
        RenderDriver {
            engine,
            context: minijinja::Value::from_serialize(context),
        }
    }

    /// Read, parse, and execute a single target.
    ///
    /// `stdin` is only read for [`Target::Stdin`].
    pub fn render_one(&self, target: &Target, stdin: &mut dyn Read) -> RenderOutcome {
        let name = target.name();
        let source = match read_target(target, stdin) {
            Ok(source) => source,
            Err(failure) => return RenderOutcome::Failed(failure),
        };

        match self.engine.render_str(&name, &source, &self.context) {
            Ok(rendered) => RenderOutcome::Succeeded(rendered),
            Err(err) => {
                let failure = err.failure_code();
                tracing::error!(template = %name, stage = %failure, "{err}");
                RenderOutcome::Failed(failure)
            }
        }
    }

    /// Render every target in order, writing each success to `out`.
    pub fn run(&self, targets: &[Target], stdin: &mut dyn Read, out: &mut dyn Write) -> ExitStatus {
        let mut status = ExitStatus::default();
        for target in targets {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.render_one(target, stdin)))
                .unwrap_or_else(|payload| {
                    tracing::error!(
                        template = %target.name(),
                        stage = %FailureCode::Fault,
                        "unexpected fault: {}",
                        panic_message(payload.as_ref())
                    );
                    RenderOutcome::Failed(FailureCode::Fault)
                });

            let code = match outcome {
                RenderOutcome::Succeeded(rendered) => emit(target, &rendered, out),
                RenderOutcome::Failed(failure) => failure.code(),
            };
            status.record(code);
        }
        status
    }
}

fn read_target(target: &Target, stdin: &mut dyn Read) -> Result<String, FailureCode> {
    let mut source = String::new();
    match target {
        Target::Stdin => {
            stdin.read_to_string(&mut source).map_err(|e| {
                tracing::error!(template = "<stdin>", stage = %FailureCode::Read, error = %e, "cannot read template");
                FailureCode::Read
            })?;
        }
        Target::File(path) => {
            let mut file = File::open(path).map_err(|e| {
                tracing::error!(template = %path.display(), stage = %FailureCode::Open, error = %e, "cannot open template");
                FailureCode::Open
            })?;
            file.read_to_string(&mut source).map_err(|e| {
                tracing::error!(template = %path.display(), stage = %FailureCode::Read, error = %e, "cannot read template");
                FailureCode::Read
            })?;
        }
    }
    Ok(source)
}

fn emit(target: &Target, rendered: &str, out: &mut dyn Write) -> i32 {
    match writeln!(out, "{rendered}").and_then(|()| out.flush()) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(template = %target.name(), stage = %FailureCode::Fault, error = %e, "cannot write output");
            FailureCode::Fault.code()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
