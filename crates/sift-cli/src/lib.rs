//! Sift CLI - inspect and apply the module side-effect policy.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - One module per subcommand, each with an async `execute`
//! - [`error`] - `CliError` plus conversion to `miette` reports
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - Status lines on stderr
//!
//! # Example
//!
//! ```rust
//! use sift_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, true, true, &sift_config::GlobalSettings::default());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
