//! Command implementations for the Sift CLI.
//!
//! - [`eval`] - Evaluate the module side-effect policy
//! - [`plan`] - Plan module inclusion for a module graph
//! - [`check`] - Configuration validation
//! - [`print`] - Engine options as JSON
//! - [`init`] - Default configuration file
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments plus the global options and returns a Result.

pub mod check;
pub mod eval;
pub mod init;
pub mod plan;
pub mod print;
mod templates;
pub mod utils;

pub use check::execute as check_execute;
pub use eval::execute as eval_execute;
pub use init::execute as init_execute;
pub use plan::execute as plan_execute;
pub use print::execute as print_execute;
