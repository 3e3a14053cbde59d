use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FindError;

/// Well-known metadata keys that backends commonly populate.
pub mod keys {
    pub const TYPE:      &str = "type";
    pub const PATH:      &str = "path";
    pub const DIRNAME:   &str = "dirname";
    pub const BASENAME:  &str = "basename";
    pub const FILENAME:  &str = "filename";
    pub const EXTENSION: &str = "extension";
    pub const SIZE:      &str = "size";
    pub const TIMESTAMP: &str = "timestamp";
}

/// One object reported by a [`Backend`](crate::traits::Backend) listing.
///
/// `kind` and `path` are the only fields the walker looks at. Everything else
/// a backend knows about the object goes into `metadata` and is handed to
/// specifications and to the caller untouched.
///
/// `path` is backend-relative and `/`-separated. It is the value the walker
/// passes back to [`Backend::list_children`](crate::traits::Backend::list_children)
/// to expand a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Whether this is a file or a directory.
    pub kind: EntryKind,

    /// Backend-relative path, unique within a single listing.
    pub path: String,

    /// Backend-supplied metadata, passed through unmodified.
    pub metadata: BTreeMap<String, String>,
}

/// The kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Anything that is not expanded by the walker.
    File,

    /// A directory. Expanded by the walker, never tested or emitted.
    Dir,
}

impl EntryKind {
    /// The wire name: `"file"` or `"dir"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir  => "dir",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = FindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "dir"  => Ok(Self::Dir),
            other  => Err(FindError::MalformedEntry(format!("unknown type '{other}'"))),
        }
    }
}

impl Entry {
    /// A file entry with no extra metadata.
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(EntryKind::File, path)
    }

    /// A directory entry with no extra metadata.
    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Dir, path)
    }

    pub fn new(kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata value, replacing any previous value for `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Raw metadata lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Last path segment, e.g. `.test.txt` for `.hiddendir/.test.txt`.
    pub fn basename(&self) -> &str {
        self.get(keys::BASENAME)
            .unwrap_or_else(|| split_parent(&self.path).1)
    }

    /// Parent path, `""` for entries directly under the root.
    pub fn dirname(&self) -> &str {
        self.get(keys::DIRNAME)
            .unwrap_or_else(|| split_parent(&self.path).0)
    }

    /// Basename without its extension, e.g. `.test` for `.test.txt`.
    pub fn filename(&self) -> &str {
        if let Some(name) = self.get(keys::FILENAME) {
            return name;
        }
        let base = self.basename();
        match split_extension(base) {
            Some((stem, _)) => stem,
            None            => base,
        }
    }

    /// Extension without the dot. `None` when the basename has none.
    ///
    /// A leading dot does not start an extension: `.profile` has none.
    pub fn extension(&self) -> Option<&str> {
        if let Some(ext) = self.get(keys::EXTENSION) {
            return Some(ext);
        }
        split_extension(self.basename()).map(|(_, ext)| ext)
    }

    /// The mapping form of this entry: metadata plus `type` and `path`.
    pub fn to_record(&self) -> BTreeMap<String, String> {
        let mut record = self.metadata.clone();
        record.insert(keys::TYPE.to_string(), self.kind.as_str().to_string());
        record.insert(keys::PATH.to_string(), self.path.clone());
        record
    }
}

/// Build an entry from its mapping form.
///
/// `type` and `path` are required; every other key becomes metadata.
impl TryFrom<BTreeMap<String, String>> for Entry {
    type Error = FindError;

    fn try_from(mut record: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let kind = record
            .remove(keys::TYPE)
            .ok_or_else(|| FindError::MalformedEntry("missing 'type'".into()))?
            .parse()?;
        let path = record
            .remove(keys::PATH)
            .ok_or_else(|| FindError::MalformedEntry("missing 'path'".into()))?;

        Ok(Self {
            kind,
            path,
            metadata: record,
        })
    }
}

/// Split `a/b/c` into (`a/b`, `c`). Paths without a slash have parent `""`.
pub(crate) fn split_parent(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
        None    => ("", trimmed),
    }
}

fn split_extension(base: &str) -> Option<(&str, &str)> {
    let dot = base.rfind('.')?;
    if dot == 0 || dot + 1 == base.len() {
        return None;
    }
    Some((&base[..dot], &base[dot + 1..]))
}
