//! Error types for calens

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CalensError
pub type Result<T> = std::result::Result<T, CalensError>;

/// Main error type for calens operations
#[derive(Debug, Error)]
pub enum CalensError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Release directory errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Entry file errors
    #[error(transparent)]
    Entry(#[from] EntryError),

    /// Template rendering errors
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl CalensError {
    /// Whether the error stems from malformed changelog sources rather than
    /// from the environment the tool runs in
    pub fn is_format_error(&self) -> bool {
        match self {
            Self::Release(ReleaseError::ListFailed { .. })
            | Self::Entry(EntryError::ReadFailed { .. }) => false,
            Self::Release(_) | Self::Entry(_) => true,
            _ => false,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while discovering release directories
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The changelog root could not be listed
    #[error("error listing dir {}: {source}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Folder name matches neither `unreleased` nor `<version>[_<date>]`
    #[error("release folder name {0:?} has wrong format, expected <version>_<YYYY-MM-DD> or \"unreleased\"")]
    InvalidFolderName(String),

    /// Version part is not a valid semantic version
    #[error("release folder {name:?}: invalid version: {reason}")]
    InvalidVersion { name: String, reason: String },

    /// Date part is not a calendar date
    #[error("release folder {name:?}: unable to parse date {date:?}: {reason}")]
    InvalidDate {
        name: String,
        date: String,
        reason: String,
    },
}

/// Errors raised while reading a single entry file
#[derive(Debug, Error)]
pub enum EntryError {
    /// The entry file, or the release directory holding it, could not be read
    #[error("unable to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no title line
    #[error("unable to read first line from {}", path.display())]
    Empty { path: PathBuf },

    /// A token of the trailing link block is not a URL
    #[error("file {}: unable to parse url {token:?}: {reason}", path.display())]
    InvalidUrl {
        path: PathBuf,
        token: String,
        reason: String,
    },

    /// The parsed entry violates the entry format
    #[error("file {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Format violations detected on a parsed entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("entry title does not have a prefix, example: Bugfix: restore old behavior")]
    MissingType,

    #[error("entry type {found:?} is invalid, valid types: Security, Bugfix, Change, Enhancement")]
    UnknownType { found: String },

    #[error("entry title is empty")]
    EmptyTitle,

    #[error("title is too long ({len} characters, at most {max} allowed for this type)")]
    TitleTooLong { len: usize, max: usize },

    #[error("title {title:?} must not end with punctuation")]
    TitlePunctuation { title: String },
}

/// Template rendering and output errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template file could not be read
    #[error("unable to read template from {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template failed to compile or execute
    #[error("error executing template: {0}")]
    Template(String),

    /// Output file could not be written
    #[error("unable to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
