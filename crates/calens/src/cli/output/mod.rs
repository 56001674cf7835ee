//! Output formatting utilities

use std::io::{self, Write};

use console::{style, Style};

/// Print a success message
pub fn success(message: &str) {
    println!("{}", success_line(message));
}

/// Format a success message without printing it
pub fn success_line(message: &str) -> String {
    format!("{} {}", style("✓").green().bold(), message)
}

/// Write `contents` to stdout, reporting a closed pipe as an error
pub fn write_stdout(contents: &[u8]) -> io::Result<()> {
    write_to(io::stdout().lock(), contents)
}

fn write_to(mut out: impl Write, contents: &[u8]) -> io::Result<()> {
    out.write_all(contents)?;
    out.flush()
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}
