//! Calens Changelog - Changelog generation from release directories
//!
//! A changelog source is a directory with one subdirectory per release
//! (`unreleased` or `<version>[_<YYYY-MM-DD>]`), each holding one small text
//! file per change. This crate discovers and orders the releases, parses the
//! entry files and hands the result to a user supplied template.

pub mod aggregator;
pub mod entry;
pub mod fs;
pub mod generator;
pub mod release;
pub mod render;
pub mod text;
pub mod version;

pub use entry::{Entry, EntryParser, EntryType, IssueTracker, Reference};
pub use fs::{ChangelogFs, DirEntry, MemoryFs, OsFs};
pub use generator::{ChangelogGenerator, ReleaseChanges};
pub use release::Release;
pub use render::TemplateRenderer;
pub use text::{capitalize, wrap_text};
pub use version::{parse_release_name, ReleaseName, UNRELEASED};
