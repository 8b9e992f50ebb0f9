//! Terminal UI helpers for status messages.
//!
//! Status lines go to stderr. Command results go to stdout and never carry
//! color codes.
//!
//! ```no_run
//! use sift_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Configuration is valid");
//! ui::warning("No config file found, using defaults");
//! ```

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{info, success, warning};

static COLORS_ENABLED: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them even without a
/// terminal; otherwise colors follow whether stderr is attended.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether status messages are colored. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS_ENABLED.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub fn colors_enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

/// Suppress info and success lines; warnings and errors still print.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_color_env() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color() {
        clear_color_env();
        unsafe { std::env::set_var("NO_COLOR", "1") };
        assert!(!should_use_color());
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        clear_color_env();
        unsafe { std::env::set_var("FORCE_COLOR", "1") };
        assert!(should_use_color());
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_no_color_overrides_force() {
        clear_color_env();
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_color());
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_flag_disables_colors() {
        clear_color_env();
        unsafe { std::env::set_var("FORCE_COLOR", "1") };
        init_colors(true);
        assert!(!colors_enabled());
        init_colors(false);
        assert!(colors_enabled());
        clear_color_env();
        init_colors(true);
    }
}
