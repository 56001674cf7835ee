//! Check command - parse every release and entry without rendering

use std::fmt::Write;

use clap::Args;
use console::style;
use serde_json::json;
use tracing::info;

use calens_changelog::{ChangelogGenerator, EntryType, ReleaseChanges};

use super::SourceArgs;
use crate::cli::output::{key_value, success_line, version_style, write_stdout};
use crate::cli::{Cli, OutputFormat};

/// Parse all releases and entries and report what was found
#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only check these versions (repeatable, comma separated)
    #[arg(long = "for-version", value_name = "VERSION", value_delimiter = ',')]
    pub for_versions: Vec<String>,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(versions = ?self.for_versions, "executing check command");
        let cwd = std::env::current_dir()?;
        let source = self.source.resolve(&cwd)?;

        let changes = ChangelogGenerator::new(source.tracker)
            .with_versions(self.for_versions.clone())
            .collect(&source.changelog.input)?;

        let summary = report(&changes, cli.format, cli.quiet)?;
        write_stdout(summary.as_bytes())?;
        Ok(())
    }
}

/// Summary of `changes` in the requested format
fn report(changes: &[ReleaseChanges], format: OutputFormat, quiet: bool) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            let summary: Vec<_> = changes
                .iter()
                .map(|release| {
                    json!({
                        "version": release.version,
                        "date": release.date,
                        "entries": release.entries.len(),
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
        OutputFormat::Text if quiet => {}
        OutputFormat::Text => {
            for release in changes {
                writeln!(
                    out,
                    "{} {}",
                    version_style().apply_to(&release.version),
                    style(&release.date).dim()
                )?;
                for (entry_type, count) in type_counts(release) {
                    writeln!(out, "{}", key_value(entry_type.as_str(), &count.to_string()))?;
                }
            }

            let total: usize = changes.iter().map(|r| r.entries.len()).sum();
            writeln!(
                out,
                "{}",
                success_line(&format!(
                    "{} entries in {} releases are valid",
                    total,
                    changes.len()
                ))
            )?;
        }
    }
    Ok(out)
}

/// Number of entries per type, skipping types without entries
fn type_counts(release: &ReleaseChanges) -> Vec<(EntryType, usize)> {
    EntryType::ALL
        .into_iter()
        .map(|t| {
            let count = release.entries.iter().filter(|e| e.entry_type == t).count();
            (t, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}
