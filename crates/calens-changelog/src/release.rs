//! Release discovery

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use calens_core::{ReleaseError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::fs::ChangelogFs;
use crate::version::{parse_release_name, UNRELEASED};

/// One release directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    /// Directory holding the release's entry files
    #[serde(skip)]
    pub path: PathBuf,
    /// Semantic version, or `unreleased`
    pub version: String,
    /// Release date, absent for unreleased work
    pub date: Option<NaiveDate>,
}

impl Release {
    /// Whether this is the in-progress release
    pub fn is_unreleased(&self) -> bool {
        self.version == UNRELEASED
    }
}

/// List the release subdirectories of `root`, most recent first.
///
/// Files directly under `root` (such as the template) are ignored. Any
/// subdirectory whose name is not a valid release name aborts discovery.
#[instrument(skip(fs), fields(root = %root.display()))]
pub fn discover_releases(fs: &dyn ChangelogFs, root: &Path) -> Result<Vec<Release>> {
    let listing = fs.list_dir(root).map_err(|source| ReleaseError::ListFailed {
        path: root.to_path_buf(),
        source,
    })?;

    let mut releases = Vec::new();
    for entry in listing {
        if !entry.is_dir {
            debug!(name = %entry.name, "skipping non-directory");
            continue;
        }

        let name = parse_release_name(&entry.name)?;
        debug!(folder = %entry.name, version = %name.version, date = ?name.date, "found release");
        releases.push(Release {
            path: root.join(&entry.name),
            version: name.version,
            date: name.date,
        });
    }

    sort_releases(&mut releases);
    info!(release_count = releases.len(), "releases discovered");
    Ok(releases)
}

/// Order releases by recency: `unreleased` first, then other undated
/// releases, then dated releases with later dates first. Releases sharing a
/// date are ordered by ascending version string.
pub fn sort_releases(releases: &mut [Release]) {
    releases.sort_by(|a, b| recency(a, b).then_with(|| a.version.cmp(&b.version)));
}

fn recency(a: &Release, b: &Release) -> Ordering {
    match (a.date, b.date) {
        (None, None) => b.is_unreleased().cmp(&a.is_unreleased()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => b.cmp(&a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{MemoryFs, OsFs};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_discover_and_sort() {
        let temp = TempDir::new().unwrap();
        let expected = [
            ("unreleased", "unreleased", None),
            (
                "2.0.0-rc.1+build.12345_2023-11-12",
                "2.0.0-rc.1+build.12345",
                date(2023, 11, 12),
            ),
            ("0.0.1-rc.1_2023-11-10", "0.0.1-rc.1", date(2023, 11, 10)),
            ("1.0.1_2023-11-10", "1.0.1", date(2023, 11, 10)),
            ("4.0.0_2023-11-09", "4.0.0", date(2023, 11, 9)),
            ("1.0.2-alpha.10_2023-11-08", "1.0.2-alpha.10", date(2023, 11, 8)),
            ("1.0.0_2023-09-07", "1.0.0", date(2023, 9, 7)),
            ("12.10.21_2023-05-01", "12.10.21", date(2023, 5, 1)),
        ];
        // create in reverse so listing order does not line up by accident
        for (folder, _, _) in expected.iter().rev() {
            std::fs::create_dir(temp.path().join(folder)).unwrap();
        }
        std::fs::write(temp.path().join("CHANGELOG.tmpl"), "").unwrap();

        let releases = discover_releases(&OsFs, temp.path()).unwrap();
        assert_eq!(releases.len(), expected.len());
        for (release, (folder, version, date)) in releases.iter().zip(expected.iter()) {
            assert_eq!(release.version, *version);
            assert_eq!(release.date, *date);
            assert_eq!(release.path, temp.path().join(folder));
        }
    }

    #[test]
    fn test_unreleased_before_undated() {
        let fs = MemoryFs::new()
            .with_dir("changelog/0.9.0")
            .with_dir("changelog/unreleased")
            .with_dir("changelog/1.0.0_2024-01-01");

        let releases = discover_releases(&fs, Path::new("changelog")).unwrap();
        let versions: Vec<&str> = releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["unreleased", "0.9.0", "1.0.0"]);
        assert!(releases[0].is_unreleased());
    }

    #[test]
    fn test_invalid_folder_is_fatal() {
        let fs = MemoryFs::new()
            .with_dir("changelog/unreleased")
            .with_dir("changelog/drafts");

        let err = discover_releases(&fs, Path::new("changelog")).unwrap_err();
        assert!(matches!(
            err,
            calens_core::CalensError::Release(ReleaseError::InvalidFolderName(ref name)) if name == "drafts"
        ));
    }

    #[test]
    fn test_missing_root() {
        let err = discover_releases(&MemoryFs::new(), Path::new("changelog")).unwrap_err();
        assert!(matches!(
            err,
            calens_core::CalensError::Release(ReleaseError::ListFailed { .. })
        ));
    }

    #[test]
    fn test_sort_is_total_for_equal_dates() {
        let mk = |version: &str| Release {
            path: PathBuf::from(version),
            version: version.to_string(),
            date: date(2023, 1, 1),
        };
        let mut a = vec![mk("1.0.1"), mk("1.0.0"), mk("0.9.9")];
        let mut b = vec![mk("0.9.9"), mk("1.0.1"), mk("1.0.0")];
        sort_releases(&mut a);
        sort_releases(&mut b);
        assert_eq!(a, b);
        assert_eq!(a[0].version, "0.9.9");
    }
}
