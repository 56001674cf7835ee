//! calens - Render a changelog from per-release entry directories

mod cli;
mod exit_codes;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

/// Environment variable enabling the JSON debug log file
const LOG_DIR_ENV: &str = "CALENS_LOG_DIR";

fn main() {
    let cli = Cli::parse();
    let guard = init_tracing(cli.verbose);

    let code = match cli.execute() {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            output::error(&err.to_string());
            exit_codes::for_error(&err)
        }
    };

    // flush the file appender before exiting
    drop(guard);
    std::process::exit(code);
}

/// Set up tracing with up to two layers:
/// - Console (stderr): controlled by RUST_LOG (default: warn, `--verbose`: debug)
/// - File: debug-level JSON to `$CALENS_LOG_DIR`, when set
fn init_tracing(verbose: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "calens.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    tracing_subscriber::registry().with(console_layer).init();

    None
}

/// Returns the log directory from the environment, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = std::path::PathBuf::from(std::env::var_os(LOG_DIR_ENV)?);
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
