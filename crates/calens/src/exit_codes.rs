//! Exit codes for the CLI

use calens_core::CalensError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error (config file, template, unreadable directories)
pub const CONFIG_ERROR: i32 = 2;

/// Malformed changelog source (release folder or entry file)
pub const FORMAT_ERROR: i32 = 3;

/// Map an error to the process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CalensError>() {
        Some(e) if e.is_format_error() => FORMAT_ERROR,
        Some(_) => CONFIG_ERROR,
        None => ERROR,
    }
}
