//! Entry file parser
//!
//! An entry file looks like this:
//!
//! ```text
//! Bugfix: restore old behavior
//!
//! Free-form text, wrapped at will. Blank lines separate paragraphs.
//!
//! https://github.com/restic/restic/issues/1234
//! https://github.com/restic/restic/pull/1235
//! ```
//!
//! The first line holds type and title, the last block lists reference URLs.

use std::path::Path;

use calens_core::{EntryError, Result, ValidationError};
use tracing::{debug, instrument};
use url::Url;

use super::classifier::IssueTracker;
use super::{Entry, EntryType};
use crate::fs::ChangelogFs;
use crate::text::{capitalize, CODE_FENCE};

/// Delimiter between type and title on the first line
const TYPE_DELIMITER: &str = ": ";

/// Parser for entry files
#[derive(Debug, Clone, Default)]
pub struct EntryParser {
    tracker: IssueTracker,
}

impl EntryParser {
    /// Create a parser using the default tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser recognizing references of `tracker`
    pub fn with_tracker(tracker: IssueTracker) -> Self {
        Self { tracker }
    }

    /// Read and parse the entry file at `path`
    #[instrument(skip(self, fs), fields(path = %path.display()))]
    pub fn read(&self, fs: &dyn ChangelogFs, path: &Path) -> Result<Entry> {
        let text = fs
            .read_to_string(path)
            .map_err(|source| EntryError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.parse(path, &text)?)
    }

    /// Parse entry `text`; `path` is only used in error messages
    pub fn parse(&self, path: &Path, text: &str) -> std::result::Result<Entry, EntryError> {
        let invalid = |source: ValidationError| EntryError::Invalid {
            path: path.to_path_buf(),
            source,
        };

        let mut lines = text.lines();
        let title_line = lines.next().ok_or_else(|| EntryError::Empty {
            path: path.to_path_buf(),
        })?;

        let (entry_type, raw_title) = match title_line.split_once(TYPE_DELIMITER) {
            Some((prefix, title)) => {
                let name = capitalize(prefix.trim());
                let entry_type = name.parse::<EntryType>().map_err(invalid)?;
                (entry_type, title)
            }
            None => return Err(invalid(ValidationError::MissingType)),
        };
        let title = capitalize(raw_title.trim());

        let mut blocks = split_blocks(lines);
        let mut urls = Vec::new();
        if let Some(links) = blocks.pop() {
            for token in links.split_whitespace() {
                let url = Url::parse(token).map_err(|e| EntryError::InvalidUrl {
                    path: path.to_path_buf(),
                    token: token.to_string(),
                    reason: e.to_string(),
                })?;
                urls.push(url);
            }
        }

        let paragraphs = blocks.iter().map(|p| capitalize(p.trim())).collect();
        let entry = Entry::new(entry_type, title, paragraphs, urls, &self.tracker);
        entry.validate().map_err(invalid)?;

        debug!(
            entry_type = %entry.entry_type,
            paragraphs = entry.paragraphs.len(),
            urls = entry.urls.len(),
            primary_id = ?entry.primary_id,
            "entry parsed"
        );
        Ok(entry)
    }
}

/// Group body lines into blocks separated by blank lines.
///
/// Lines of a block are trimmed and joined with single spaces. A fenced code
/// block is kept verbatim, newlines included, up to its closing fence.
fn split_blocks<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut in_code = false;

    for line in lines {
        if in_code {
            current.push('\n');
            current.push_str(line.trim_end());
            if line.trim_start().starts_with(CODE_FENCE) {
                in_code = false;
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }

        if trimmed.starts_with(CODE_FENCE) {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            current.push_str(trimmed);
            in_code = true;
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(trimmed);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn parse(text: &str) -> std::result::Result<Entry, EntryError> {
        EntryParser::new().parse(Path::new("changelog/unreleased/issue-1"), text)
    }

    fn validation_error(text: &str) -> ValidationError {
        match parse(text) {
            Err(EntryError::Invalid { source, .. }) => source,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_minimal() {
        let entry = parse("Bugfix: subject line\n\nhttps://github.com/restic/restic/issues/12345")
            .unwrap();
        let issue = url("https://github.com/restic/restic/issues/12345");

        assert_eq!(entry.entry_type, EntryType::Bugfix);
        assert_eq!(entry.type_short, "Fix");
        assert_eq!(entry.title, "Subject line");
        assert!(entry.paragraphs.is_empty());
        assert_eq!(entry.urls, vec![issue.clone()]);
        assert_eq!(entry.issues, vec!["12345"]);
        assert_eq!(entry.issue_urls, vec![issue.clone()]);
        assert!(entry.prs.is_empty());
        assert_eq!(entry.primary_id.as_deref(), Some("12345"));
        assert_eq!(entry.primary_url, Some(issue));
    }

    #[test]
    fn test_parse_paragraphs() {
        let entry = parse(
            "Security: short and terse summary

A block of text. Lorem ipsum or so. May
wrap around,
arbitrarily.

second block of text.
may also contain
many different lines.

Last block contains just
a few
links.

https://github.com/restic/restic/issues/12345
https://github.com/restic/restic/pull/666666
",
        )
        .unwrap();

        assert_eq!(entry.title, "Short and terse summary");
        assert_eq!(entry.type_short, "Sec");
        assert_eq!(
            entry.paragraphs,
            vec![
                "A block of text. Lorem ipsum or so. May wrap around, arbitrarily.",
                "Second block of text. may also contain many different lines.",
                "Last block contains just a few links.",
            ]
        );
        assert_eq!(entry.issues, vec!["12345"]);
        assert_eq!(entry.prs, vec!["666666"]);
        assert_eq!(
            entry.pr_urls,
            vec![url("https://github.com/restic/restic/pull/666666")]
        );
        assert_eq!(entry.primary_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_parse_code_block_and_other_urls() {
        let entry = parse(
            "Enhancement: foo bar subject

```bash
echo 'test code block with type'
```

https://github.com/restic/restic/issues/12345
https://github.com/restic/rest-server/issues/232323
https://github.com/restic/restic/pull/666666
https://forum.restic.net/t/getting-last-successful-backup-time/531
",
        )
        .unwrap();

        assert_eq!(entry.title, "Foo bar subject");
        assert_eq!(
            entry.paragraphs,
            vec!["```bash\necho 'test code block with type'\n```"]
        );
        assert_eq!(entry.urls.len(), 4);
        assert_eq!(entry.issues, vec!["12345", "232323"]);
        assert_eq!(entry.prs, vec!["666666"]);
        assert_eq!(
            entry.other_urls,
            vec![url(
                "https://forum.restic.net/t/getting-last-successful-backup-time/531"
            )]
        );
    }

    #[test]
    fn test_parse_code_block_keeps_spacing() {
        let entry = parse(
            "Security: short and terse summary\n\n```\nexample\n   with\n       random spaces\n```\n\nLast block contains just\na few\nlinks.\n\nhttps://github.com/restic/restic/issues/12345",
        )
        .unwrap();

        assert_eq!(
            entry.paragraphs,
            vec![
                "```\nexample\n   with\n       random spaces\n```",
                "Last block contains just a few links.",
            ]
        );
    }

    #[test]
    fn test_parse_code_block_with_blank_line() {
        let entry = parse(
            "Change: keep blank lines in code\n\n```\nfirst\n\nsecond\n```\n\nhttps://restic.net/",
        )
        .unwrap();
        assert_eq!(entry.paragraphs, vec!["```\nfirst\n\nsecond\n```"]);
    }

    #[test]
    fn test_parse_title_only() {
        let entry = parse("change: drop support for old servers\n").unwrap();
        assert_eq!(entry.entry_type, EntryType::Change);
        assert_eq!(entry.title, "Drop support for old servers");
        assert!(entry.urls.is_empty());
        assert!(entry.primary_id.is_none());
    }

    #[test]
    fn test_parse_primary_is_first_reference() {
        let entry = parse(
            "Bugfix: fix it\n\nhttps://restic.net/ https://github.com/restic/restic/pull/7 https://github.com/restic/restic/issues/3",
        )
        .unwrap();
        assert_eq!(entry.primary_id.as_deref(), Some("7"));
        assert_eq!(entry.issues, vec!["3"]);
        assert_eq!(entry.other_urls, vec![url("https://restic.net/")]);
    }

    #[test]
    fn test_parse_missing_type() {
        assert_eq!(
            validation_error("subject line\n\nhttps://restic.net/"),
            ValidationError::MissingType
        );
        // the delimiter needs the space
        assert_eq!(
            validation_error("Bugfix:subject line"),
            ValidationError::MissingType
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(
            validation_error("Feature: something new"),
            ValidationError::UnknownType {
                found: "Feature".to_string()
            }
        );
    }

    #[test]
    fn test_parse_title_errors() {
        assert!(matches!(
            validation_error("Security: short and terse summary."),
            ValidationError::TitlePunctuation { .. }
        ));
        assert_eq!(validation_error("Bugfix:  "), ValidationError::EmptyTitle);

        let line = format!("Enhancement: {}", "x".repeat(79));
        assert!(matches!(
            validation_error(&line),
            ValidationError::TitleTooLong { len: 79, .. }
        ));
    }

    #[test]
    fn test_parse_invalid_url() {
        let err = parse("Bugfix: subject\n\nSome prose at the end").unwrap_err();
        match err {
            EntryError::InvalidUrl { token, path, .. } => {
                assert_eq!(token, "Some");
                assert_eq!(path, Path::new("changelog/unreleased/issue-1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(matches!(parse(""), Err(EntryError::Empty { .. })));
    }

    #[test]
    fn test_read_from_fs() {
        let fs = MemoryFs::new().with_file(
            "changelog/unreleased/pull-7",
            "Enhancement: add a flag\n\nhttps://github.com/restic/restic/pull/7\n",
        );
        let entry = EntryParser::new()
            .read(&fs, Path::new("changelog/unreleased/pull-7"))
            .unwrap();
        assert_eq!(entry.prs, vec!["7"]);

        let err = EntryParser::new()
            .read(&fs, Path::new("changelog/unreleased/missing"))
            .unwrap_err();
        assert!(matches!(
            err,
            calens_core::CalensError::Entry(EntryError::ReadFailed { .. })
        ));
    }
}
