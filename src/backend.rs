//! Backends shipped with the crate.
//!
//! [`MemoryBackend`] holds a tree in memory and is what the tests and
//! doctests use. [`LocalBackend`] lists a directory on the local disk.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use ignore::WalkBuilder;
use tracing::debug;

use crate::entry::{keys, split_parent, Entry, EntryKind};
use crate::error::FindError;
use crate::traits::Backend;

// ---------------------------------------------------------------------------
// MemoryBackend
// ---------------------------------------------------------------------------

/// An in-memory tree.
///
/// Entries are filed under the parent directory derived from their `path`
/// and listed in insertion order. Every directory entry is listable, even
/// when nothing has been inserted under it.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    listings: HashMap<String, Vec<Entry>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// An empty tree: the root lists as empty.
    pub fn new() -> Self {
        let mut listings = HashMap::new();
        listings.insert(String::new(), Vec::new());
        Self { listings }
    }

    /// File `entry` under its parent directory.
    pub fn insert(&mut self, entry: Entry) {
        if entry.is_dir() {
            self.listings.entry(entry.path.clone()).or_default();
        }
        let parent = split_parent(&entry.path).0.to_string();
        self.listings.entry(parent).or_default().push(entry);
    }

    /// Chained form of [`insert`](Self::insert).
    pub fn with(mut self, entry: Entry) -> Self {
        self.insert(entry);
        self
    }

    /// Replace the listing of `path` verbatim.
    ///
    /// No parent is derived, so the entries are returned exactly as given
    /// when `path` is listed.
    pub fn set_listing(&mut self, path: impl Into<String>, entries: Vec<Entry>) {
        self.listings.insert(path.into(), entries);
    }

    /// Chained form of [`set_listing`](Self::set_listing).
    pub fn with_listing(mut self, path: impl Into<String>, entries: Vec<Entry>) -> Self {
        self.set_listing(path, entries);
        self
    }
}

impl FromIterator<Entry> for MemoryBackend {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut backend = Self::new();
        for entry in iter {
            backend.insert(entry);
        }
        backend
    }
}

impl Backend for MemoryBackend {
    fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError> {
        self.listings
            .get(path)
            .cloned()
            .ok_or_else(|| FindError::NotFound(path.to_string()))
    }
}

// ---------------------------------------------------------------------------
// LocalBackend
// ---------------------------------------------------------------------------

/// A directory on the local filesystem.
///
/// Paths are relative to `root` and `/`-separated. Each listing reads one
/// directory level, sorted by file name, with no ignore rules applied and
/// hidden files included. Symbolic links are not followed and are reported
/// as files. Names that are not valid UTF-8 cannot be expressed as an entry
/// path, so they are skipped (logged at debug level).
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, seg| acc.join(seg))
    }
}

impl Backend for LocalBackend {
    fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError> {
        let dir = self.resolve(path);

        let meta = fs::metadata(&dir).map_err(|e| map_io_error(path, e))?;
        if !meta.is_dir() {
            return Err(FindError::NotADirectory(path.to_string()));
        }

        let walker = WalkBuilder::new(&dir)
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let parent = path.trim_matches('/');
        let mut entries = Vec::new();

        for res in walker {
            let dent = res.map_err(|e| map_ignore_error(path, e))?;
            if dent.depth() == 0 {
                continue;
            }
            let is_dir = dent.file_type().is_some_and(|ft| ft.is_dir());
            let Some(name) = dent.file_name().to_str().map(str::to_owned) else {
                debug!("Skipping non UTF-8 name {:?} in '{}'", dent.file_name(), path);
                continue;
            };
            let rel = if parent.is_empty() {
                name.clone()
            } else {
                format!("{parent}/{name}")
            };

            let kind = if is_dir { EntryKind::Dir } else { EntryKind::File };
            let mut entry = Entry::new(kind, rel)
                .with(keys::DIRNAME, parent)
                .with(keys::BASENAME, name.as_str());

            let (stem, ext) = match name.rfind('.') {
                Some(i) if i > 0 && i + 1 < name.len() => (&name[..i], Some(&name[i + 1..])),
                _ => (name.as_str(), None),
            };
            entry = entry.with(keys::FILENAME, stem);
            if let Some(ext) = ext {
                entry = entry.with(keys::EXTENSION, ext);
            }

            if let Ok(md) = dent.metadata() {
                if !is_dir {
                    entry = entry.with(keys::SIZE, md.len().to_string());
                }
                let mtime = md
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok());
                if let Some(mtime) = mtime {
                    entry = entry.with(keys::TIMESTAMP, mtime.as_secs().to_string());
                }
            }

            entries.push(entry);
        }

        debug!("Listed '{}': {} entries", path, entries.len());
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Map io::Error / ignore::Error to FindError
// ---------------------------------------------------------------------------

fn map_io_error(path: &str, err: io::Error) -> FindError {
    match err.kind() {
        io::ErrorKind::NotFound         => FindError::NotFound(path.to_string()),
        io::ErrorKind::PermissionDenied => FindError::PermissionDenied(path.to_string()),
        _ => FindError::Io {
            path:   path.to_string(),
            source: err,
        },
    }
}

fn map_ignore_error(path: &str, err: ignore::Error) -> FindError {
    match err {
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => map_ignore_error(path, *err),
        ignore::Error::Io(io_err) => map_io_error(path, io_err),
        other => FindError::Backend(other.to_string()),
    }
}
