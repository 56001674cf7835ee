//! Changelog generation

use std::path::Path;

use calens_core::Result;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::aggregator::read_release_entries;
use crate::entry::{Entry, EntryParser, IssueTracker};
use crate::fs::{ChangelogFs, OsFs};
use crate::release::{discover_releases, Release};
use crate::version::DATE_FORMAT;

/// Date shown for the in-progress release
pub const UNRELEASED_DATE: &str = "UNRELEASED";

/// One release as handed to the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseChanges {
    pub version: String,
    /// `YYYY-MM-DD`, or `UNRELEASED`
    pub date: String,
    pub entries: Vec<Entry>,
}

impl ReleaseChanges {
    /// Pair a release with its entries
    pub fn new(release: &Release, entries: Vec<Entry>) -> Self {
        let date = release
            .date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| UNRELEASED_DATE.to_string());

        Self {
            version: release.version.clone(),
            date,
            entries,
        }
    }
}

/// Changelog generator
pub struct ChangelogGenerator {
    fs: Box<dyn ChangelogFs>,
    parser: EntryParser,
    versions: Vec<String>,
}

impl ChangelogGenerator {
    /// Create a generator reading the real filesystem
    pub fn new(tracker: IssueTracker) -> Self {
        Self {
            fs: Box::new(OsFs),
            parser: EntryParser::with_tracker(tracker),
            versions: Vec::new(),
        }
    }

    /// Read from a custom filesystem
    pub fn with_fs<F: ChangelogFs + 'static>(mut self, fs: F) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Only include the given versions (all when empty)
    pub fn with_versions(mut self, versions: Vec<String>) -> Self {
        self.versions = versions;
        self
    }

    /// Collect all releases below `root` that have at least one entry,
    /// most recent first
    #[instrument(skip(self), fields(root = %root.display(), filter = ?self.versions))]
    pub fn collect(&self, root: &Path) -> Result<Vec<ReleaseChanges>> {
        info!("collecting changelog entries");
        let releases = discover_releases(self.fs.as_ref(), root)?;

        for version in &self.versions {
            if !releases.iter().any(|r| &r.version == version) {
                warn!(version = %version, "requested version not found");
            }
        }

        let mut changes = Vec::new();
        for release in releases.iter().filter(|r| self.is_selected(r)) {
            let entries = read_release_entries(self.fs.as_ref(), &release.path, &self.parser)?;
            if entries.is_empty() {
                debug!(version = %release.version, "release has no entries, skipping");
                continue;
            }
            changes.push(ReleaseChanges::new(release, entries));
        }

        info!(
            release_count = changes.len(),
            entry_count = changes.iter().map(|c| c.entries.len()).sum::<usize>(),
            "changelog entries collected"
        );
        Ok(changes)
    }

    fn is_selected(&self, release: &Release) -> bool {
        self.versions.is_empty() || self.versions.iter().any(|v| v == &release.version)
    }
}
