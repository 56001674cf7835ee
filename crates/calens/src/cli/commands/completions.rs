//! Shell completion scripts

use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::output::{path_style, success, write_stdout};
use crate::cli::Cli;

/// Print a completion script for a shell
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, "executing completions command");
        let script = completion_script(self.shell);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &script)?;
                if !cli.quiet {
                    success(&format!(
                        "Completions written to {}",
                        path_style().apply_to(path.display())
                    ));
                }
            }
            None => write_stdout(&script)?,
        }

        Ok(())
    }
}

fn completion_script(shell: Shell) -> Vec<u8> {
    let mut buf = Vec::new();
    generate(shell, &mut Cli::command(), "calens", &mut buf);
    buf
}
