//! Collects and orders the entries of one release directory

use std::path::{Path, PathBuf};

use calens_core::{EntryError, Result};
use tracing::{debug, instrument};

use crate::entry::{Entry, EntryParser};
use crate::fs::ChangelogFs;

/// File names inside a release directory that are not entries
pub const RESERVED_FILE_NAMES: [&str; 2] = ["TEMPLATE", "versions"];

/// Entry files of a release directory, sorted by name.
///
/// Reserved names, hidden files and subdirectories are skipped.
pub fn entry_files(fs: &dyn ChangelogFs, dir: &Path) -> Result<Vec<PathBuf>> {
    let listing = fs.list_dir(dir).map_err(|source| EntryError::ReadFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = listing
        .into_iter()
        .filter(|entry| {
            let skip = entry.is_dir
                || entry.name.starts_with('.')
                || RESERVED_FILE_NAMES.contains(&entry.name.as_str());
            if skip {
                debug!(name = %entry.name, "skipping non-entry file");
            }
            !skip
        })
        .map(|entry| entry.name)
        .collect();
    names.sort();

    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

/// Parse all entries of the release directory `dir`, ordered by type.
#[instrument(skip(fs, parser), fields(dir = %dir.display()))]
pub fn read_release_entries(
    fs: &dyn ChangelogFs,
    dir: &Path,
    parser: &EntryParser,
) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for file in entry_files(fs, dir)? {
        entries.push(parser.read(fs, &file)?);
    }

    sort_entries(&mut entries);
    debug!(entry_count = entries.len(), "release entries read");
    Ok(entries)
}

/// Stable sort by type priority
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_key(|e| e.entry_type.priority());
}
