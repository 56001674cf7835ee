//! Render command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use calens_changelog::fs::OsFs;
use calens_changelog::render::{load_template, write_output};
use calens_changelog::{ChangelogGenerator, TemplateRenderer};
use calens_core::config::resolve_template;

use super::SourceArgs;
use crate::cli::output::{path_style, success, write_stdout};
use crate::cli::{Cli, OutputFormat};

/// Render the changelog through the template
#[derive(Debug, Args)]
pub struct RenderCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write generated changelog to FILE (default: print to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read template from FILE, relative to the input directory
    /// [default: CHANGELOG.tmpl]
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Only render these versions (repeatable, comma separated)
    #[arg(long = "for-version", value_name = "VERSION", value_delimiter = ',')]
    pub for_versions: Vec<String>,
}

impl RenderCommand {
    /// Execute the render command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(versions = ?self.for_versions, format = ?cli.format, "executing render command");
        let cwd = std::env::current_dir()?;
        let source = self.source.resolve(&cwd)?;

        let generator = ChangelogGenerator::new(source.tracker.clone())
            .with_versions(self.for_versions.clone());

        // everything is parsed and rendered before any output is written
        let contents = match cli.format {
            OutputFormat::Json => {
                let changes = generator.collect(&source.changelog.input)?;
                let mut json = serde_json::to_string_pretty(&changes)?;
                json.push('\n');
                json
            }
            OutputFormat::Text => {
                let template_path = match &self.template {
                    Some(template) => resolve_template(&source.changelog.input, template),
                    None => source.changelog.template_path(),
                };
                let template = load_template(&OsFs, &template_path)?;
                let renderer = TemplateRenderer::new(&template)?;

                let changes = generator.collect(&source.changelog.input)?;
                renderer.render(&changes)?
            }
        };

        let output = self
            .output
            .as_ref()
            .map(|o| cwd.join(o))
            .or(source.changelog.output);
        match output {
            Some(path) => {
                write_output(&path, &contents)?;
                if !cli.quiet {
                    success(&format!(
                        "Changelog written to {}",
                        path_style().apply_to(path.display())
                    ));
                }
            }
            None => write_stdout(contents.as_bytes())?,
        }

        Ok(())
    }
}
