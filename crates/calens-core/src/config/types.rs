//! Configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_INPUT_DIR, DEFAULT_TEMPLATE_FILE, DEFAULT_TRACKER_HOST};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog source and output locations
    pub changelog: ChangelogConfig,

    /// Issue tracker used to classify reference URLs
    pub tracker: TrackerConfig,
}

/// Changelog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Directory holding one subdirectory per release
    pub input: PathBuf,

    /// Template file, relative to `input` unless absolute
    pub template: PathBuf,

    /// Output file (stdout when unset)
    pub output: Option<PathBuf>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_DIR),
            template: PathBuf::from(DEFAULT_TEMPLATE_FILE),
            output: None,
        }
    }
}

impl ChangelogConfig {
    /// Template path with relative paths resolved against the input directory
    pub fn template_path(&self) -> PathBuf {
        resolve_template(&self.input, &self.template)
    }
}

/// Resolve a template path against the changelog input directory
pub fn resolve_template(input: &Path, template: &Path) -> PathBuf {
    if template.is_absolute() {
        template.to_path_buf()
    } else {
        input.join(template)
    }
}

/// Issue tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Host whose URLs may reference issues and pull requests
    pub host: String,

    /// Restrict references to one repository (`owner/name`)
    pub repository: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_TRACKER_HOST.to_string(),
            repository: None,
        }
    }
}
