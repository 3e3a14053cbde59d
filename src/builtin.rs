//! Ready-made atomic specifications.
//!
//! These read only what a backend puts on an [`Entry`] (its `path` and
//! metadata), never the storage itself, so they are cheap enough to put at
//! the front of a composite.

use std::collections::BTreeSet;
use std::fmt;

use globset::{Glob, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::entry::Entry;
use crate::error::FindError;
use crate::traits::Specification;

// ---------------------------------------------------------------------------
// IsHidden
// ---------------------------------------------------------------------------

/// Matches entries whose basename starts with a dot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsHidden;

impl Specification for IsHidden {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        Ok(entry.basename().starts_with('.'))
    }
}

// ---------------------------------------------------------------------------
// HasExtension
// ---------------------------------------------------------------------------

/// Matches entries whose extension is one of a given set.
///
/// Extensions are compared without the leading dot and case-sensitively.
/// Entries with no extension never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasExtension {
    extensions: BTreeSet<String>,
}

impl HasExtension {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_string())
                .collect(),
        }
    }
}

impl Specification for HasExtension {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        Ok(entry
            .extension()
            .map(|ext| self.extensions.contains(ext))
            .unwrap_or(false))
    }
}

// ---------------------------------------------------------------------------
// InPath / MatchesGlob
// ---------------------------------------------------------------------------

/// Matches entries located inside a directory whose path matches a glob.
///
/// `InPath::new("src/*")` matches `src/a/b.rs` and `src/c/d.txt` but not
/// `src/e.rs`, which sits directly in `src`. The root (`""`, `"."`, `"./"`)
/// contains every entry.
#[derive(Clone)]
pub struct InPath {
    pattern: String,
    set:     GlobSet,
}

impl InPath {
    /// Compile `pattern`. Fails on an invalid glob.
    pub fn new(pattern: impl Into<String>) -> Result<Self, FindError> {
        let pattern = pattern.into();
        let trimmed = pattern.trim_end_matches('/');
        let dir = trimmed.strip_prefix("./").unwrap_or(trimmed);

        let mut builder = GlobSetBuilder::new();
        if dir.is_empty() || dir == "." {
            builder.add(compile("**")?);
        } else {
            builder
                .add(compile(&format!("{dir}/*"))?)
                .add(compile(&format!("{dir}/**/*"))?);
        }
        let set = builder.build().map_err(|e| invalid(&pattern, e))?;
        Ok(Self { pattern, set })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Specification for InPath {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        Ok(self.set.is_match(&entry.path))
    }
}

impl fmt::Debug for InPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InPath").field("pattern", &self.pattern).finish()
    }
}

/// Matches entries whose whole `path` matches a glob, e.g. `**/*.rs`.
#[derive(Clone)]
pub struct MatchesGlob {
    pattern: String,
    matcher: GlobMatcher,
}

impl MatchesGlob {
    /// Compile `pattern`. Fails on an invalid glob.
    pub fn new(pattern: impl Into<String>) -> Result<Self, FindError> {
        let pattern = pattern.into();
        let matcher = compile(&pattern)?.compile_matcher();
        Ok(Self { pattern, matcher })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Specification for MatchesGlob {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        Ok(self.matcher.is_match(&entry.path))
    }
}

impl fmt::Debug for MatchesGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchesGlob").field("pattern", &self.pattern).finish()
    }
}

fn compile(pattern: &str) -> Result<Glob, FindError> {
    globset::GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| invalid(pattern, e))
}

fn invalid(pattern: &str, err: globset::Error) -> FindError {
    FindError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Closures
// ---------------------------------------------------------------------------

/// A specification backed by a closure. See [`from_fn`] and [`try_from_fn`].
#[derive(Clone, Copy)]
pub struct FnSpec<F>(F);

impl<F> Specification for FnSpec<F>
where
    F: Fn(&Entry) -> Result<bool, FindError>,
{
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        (self.0)(entry)
    }
}

impl<F> fmt::Debug for FnSpec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSpec(..)")
    }
}

/// Wrap an infallible closure as a specification.
///
/// ```rust
/// use treefind::{from_fn, Entry, Specification};
///
/// let small = from_fn(|e: &Entry| e.path.len() < 8);
/// assert!(small.is_satisfied_by(&Entry::file("a.txt")).unwrap());
/// ```
pub fn from_fn<F>(f: F) -> FnSpec<impl Fn(&Entry) -> Result<bool, FindError>>
where
    F: Fn(&Entry) -> bool,
{
    FnSpec(move |entry: &Entry| -> Result<bool, FindError> { Ok(f(entry)) })
}

/// Wrap a fallible closure as a specification.
pub fn try_from_fn<F>(f: F) -> FnSpec<F>
where
    F: Fn(&Entry) -> Result<bool, FindError>,
{
    FnSpec(f)
}
