//! Changelog source settings shared by commands

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use calens_changelog::IssueTracker;
use calens_core::config::load_config_or_default;
use calens_core::ChangelogConfig;

/// Where to read the changelog from
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Read input files from DIR [default: changelog]
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,
}

/// Settings for one run, after merging config file and flags
#[derive(Debug, Clone)]
pub struct Source {
    pub changelog: ChangelogConfig,
    pub tracker: IssueTracker,
}

impl SourceArgs {
    /// Load the config file found from `cwd` and apply command line overrides.
    ///
    /// Relative paths from the config file are taken relative to the project
    /// directory holding it, paths from flags relative to `cwd`.
    pub fn resolve(&self, cwd: &Path) -> anyhow::Result<Source> {
        let (config, config_path) = load_config_or_default(cwd)?;
        let base = config_path.as_deref().map(project_root).unwrap_or(cwd);

        let mut changelog = config.changelog;
        changelog.input = base.join(&changelog.input);
        changelog.output = changelog.output.map(|output| base.join(output));
        if let Some(input) = &self.input {
            changelog.input = cwd.join(input);
        }

        debug!(
            input = %changelog.input.display(),
            template = %changelog.template_path().display(),
            output = ?changelog.output,
            "changelog source resolved"
        );
        Ok(Source {
            changelog,
            tracker: IssueTracker::from_config(&config.tracker),
        })
    }
}

/// Directory a config file applies to, looking through `.github/`
fn project_root(config_path: &Path) -> &Path {
    let dir = config_path.parent().unwrap_or(Path::new("."));
    if dir.file_name().is_some_and(|name| name == ".github") {
        dir.parent().unwrap_or(dir)
    } else {
        dir
    }
}
