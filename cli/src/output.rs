//! Terminal diagnostics for the CLI

use colored::Colorize;

/// Print a fatal error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}
