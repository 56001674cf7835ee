//! Change entries

mod classifier;
mod parser;

pub use classifier::{IssueTracker, Reference, References};
pub use parser::EntryParser;

use std::fmt;
use std::str::FromStr;

use calens_core::ValidationError;
use serde::Serialize;
use url::Url;

/// Maximum width of a `<Type>: <Title>` line
pub const MAX_TITLE_LINE: usize = 80;

/// Entry type; declaration order is the order within a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntryType {
    Security,
    Bugfix,
    Change,
    Enhancement,
}

impl EntryType {
    /// All entry types in priority order
    pub const ALL: [EntryType; 4] = [
        Self::Security,
        Self::Bugfix,
        Self::Change,
        Self::Enhancement,
    ];

    /// Name as written in entry files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Bugfix => "Bugfix",
            Self::Change => "Change",
            Self::Enhancement => "Enhancement",
        }
    }

    /// Three letter abbreviation used in overviews
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Security => "Sec",
            Self::Bugfix => "Fix",
            Self::Change => "Chg",
            Self::Enhancement => "Enh",
        }
    }

    /// Rank within a release, lower sorts first
    pub fn priority(&self) -> u8 {
        match self {
            Self::Security => 1,
            Self::Bugfix => 2,
            Self::Change => 3,
            Self::Enhancement => 4,
        }
    }

    /// Look up a type by its exact name
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| ValidationError::UnknownType {
            found: s.to_string(),
        })
    }
}

/// One change, parsed from a single entry file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub type_short: &'static str,
    pub title: String,
    pub paragraphs: Vec<String>,
    pub urls: Vec<Url>,
    pub issues: Vec<String>,
    pub issue_urls: Vec<Url>,
    pub prs: Vec<String>,
    pub pr_urls: Vec<Url>,
    pub other_urls: Vec<Url>,
    pub primary_id: Option<String>,
    pub primary_url: Option<Url>,
}

impl Entry {
    /// Assemble an entry from its parts, classifying `urls`
    pub fn new(
        entry_type: EntryType,
        title: String,
        paragraphs: Vec<String>,
        urls: Vec<Url>,
        tracker: &IssueTracker,
    ) -> Self {
        let refs = tracker.classify(&urls);
        let (primary_id, primary_url) = match refs.primary {
            Some((id, url)) => (Some(id), Some(url)),
            None => (None, None),
        };

        Self {
            entry_type,
            type_short: entry_type.abbreviation(),
            title,
            paragraphs,
            urls,
            issues: refs.issues,
            issue_urls: refs.issue_urls,
            prs: refs.prs,
            pr_urls: refs.pr_urls,
            other_urls: refs.other_urls,
            primary_id,
            primary_url,
        }
    }

    /// Longest title allowed for this entry's type
    pub fn max_title_len(&self) -> usize {
        MAX_TITLE_LINE.saturating_sub(self.entry_type.as_str().len() + 1)
    }

    /// Check the title rules
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let len = self.title.chars().count();
        let max = self.max_title_len();
        if len > max {
            return Err(ValidationError::TitleTooLong { len, max });
        }

        if self.title.ends_with(['.', '!', '?']) {
            return Err(ValidationError::TitlePunctuation {
                title: self.title.clone(),
            });
        }

        Ok(())
    }
}
