//! Directory listing and file reading capability
//!
//! Discovery, aggregation and parsing only touch the filesystem through
//! [`ChangelogFs`], so tests and embedders can supply an in-memory tree.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// A single directory listing entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    /// File name without any parent components
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl DirEntry {
    /// Create a new listing entry
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// Read-only view of the filesystem used by the changelog pipeline
pub trait ChangelogFs: Send + Sync {
    /// List the direct children of `dir`, in no particular order
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read a whole file into a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl ChangelogFs for OsFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            let name = utf8_name(entry.file_name())?;
            entries.push(DirEntry { name, is_dir });
        }
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Convert a listed name, rejecting names that are not UTF-8
fn utf8_name(name: OsString) -> io::Result<String> {
    name.into_string().map_err(|raw| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file name {raw:?} is not valid UTF-8"),
        )
    })
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

/// In-memory directory tree
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, Node>,
}

impl MemoryFs {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory, creating missing parents
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    /// Add a file with contents, creating missing parent directories
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl Into<String>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .insert(path.to_path_buf(), Node::File(contents.into()));
    }

    /// Builder form of [`MemoryFs::add_file`]
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Builder form of [`MemoryFs::add_dir`]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }
}

impl ChangelogFs for MemoryFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        match self.nodes.get(dir) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::other(format!("{} is not a directory", dir.display())))
            }
            None => return Err(io::Error::from(io::ErrorKind::NotFound)),
        }

        self.nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, node)| {
                let name = path.file_name()?.to_os_string();
                Some(utf8_name(name).map(|name| DirEntry::new(name, matches!(node, Node::Dir))))
            })
            .collect()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.nodes.get(path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(Node::Dir) => Err(io::Error::other(format!("{} is a directory", path.display()))),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}
