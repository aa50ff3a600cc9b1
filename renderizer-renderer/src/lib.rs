//! # renderizer-renderer
//!
//! minijinja-based engine and the per-template render driver.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use renderizer_core::GlobalContext;
//! use renderizer_renderer::{MissingKey, RenderDriver, Target, TemplateEngine};
//!
//! let ctx = GlobalContext::from_assignments(["--name=world"], true);
//! let driver = RenderDriver::new(TemplateEngine::new(MissingKey::Error), &ctx);
//! let status = driver.run(
//!     &[Target::File("hello.txt.tmpl".into())],
//!     &mut std::io::stdin(),
//!     &mut std::io::stdout(),
//! );
//! std::process::exit(status.code());
//! ```

pub mod driver;
pub mod engine;
pub mod error;

pub use driver::{ExitStatus, FailureCode, RenderDriver, RenderOutcome, Target};
pub use engine::{MissingKey, TemplateEngine};
pub use error::RenderError;
