//! Release folder name codec
//!
//! A release folder is named either `unreleased` or
//! `<major>.<minor>.<patch>[-<prerelease>][+<build>][_<YYYY-MM-DD>]`.

use std::sync::LazyLock;

use calens_core::ReleaseError;
use chrono::NaiveDate;
use regex::Regex;

/// Folder name (and version) of the in-progress release
pub const UNRELEASED: &str = "unreleased";

/// Date format used in folder names and rendered output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Regex for release folder names
static RELEASE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<version>[0-9]+\.[0-9]+\.[0-9]+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)(?:_(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2}))?$",
    )
    .expect("Invalid regex")
});

/// Version and optional date decoded from a release folder name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseName {
    pub version: String,
    pub date: Option<NaiveDate>,
}

/// Decode a release folder name
pub fn parse_release_name(name: &str) -> Result<ReleaseName, ReleaseError> {
    if name == UNRELEASED {
        return Ok(ReleaseName {
            version: UNRELEASED.to_string(),
            date: None,
        });
    }

    let caps = RELEASE_NAME_REGEX
        .captures(name)
        .ok_or_else(|| ReleaseError::InvalidFolderName(name.to_string()))?;

    let version = caps
        .name("version")
        .ok_or_else(|| ReleaseError::InvalidFolderName(name.to_string()))?
        .as_str();

    // leading zeros and empty pre-release identifiers slip through the regex
    semver::Version::parse(version).map_err(|e| ReleaseError::InvalidVersion {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    let date = caps
        .name("date")
        .map(|m| {
            NaiveDate::parse_from_str(m.as_str(), DATE_FORMAT).map_err(|e| {
                ReleaseError::InvalidDate {
                    name: name.to_string(),
                    date: m.as_str().to_string(),
                    reason: e.to_string(),
                }
            })
        })
        .transpose()?;

    Ok(ReleaseName {
        version: version.to_string(),
        date,
    })
}
