use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::entry::{Entry, EntryKind};
use crate::error::FindError;
use crate::stats::WalkStats;
use crate::traits::{Backend, Specification};

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters for a [`Walk`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkConfig {
    /// Maximum depth to list. Children of the root are depth 1; a directory
    /// at depth `d` is expanded only when `d < max_depth`. `Some(0)` lists
    /// nothing. Unlimited by default.
    pub max_depth: Option<usize>,
}

impl WalkConfig {
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }
}

// ---------------------------------------------------------------------------
// walk()
// ---------------------------------------------------------------------------

/// Lazily walk the tree under `root`, yielding every non-directory entry
/// that `spec` accepts.
///
/// Nothing is listed until the first call to `next()`.
///
/// ```rust
/// use treefind::{walk, Entry, IsHidden, MemoryBackend};
///
/// let backend: MemoryBackend = [
///     Entry::dir(".hiddendir"),
///     Entry::file("test.txt"),
///     Entry::file(".hiddendir/.test.txt"),
/// ]
/// .into_iter()
/// .collect();
///
/// let found: Vec<_> = walk(&backend, "", IsHidden)
///     .map(|r| r.map(|e| e.path))
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(found, vec![".hiddendir/.test.txt"]);
/// ```
pub fn walk<B, S>(backend: &B, root: impl Into<String>, spec: S) -> Walk<'_, B, S>
where
    B: Backend + ?Sized,
    S: Specification,
{
    Walk::with_config(backend, root, spec, WalkConfig::default())
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// One pending directory listing.
struct Frame {
    /// Depth of the entries in `entries`.
    depth:   usize,
    entries: std::vec::IntoIter<Entry>,
}

/// Iterator returned by [`walk`].
///
/// A depth-first, pre-order walk kept on an explicit stack of listings.
/// Directories are expansion points only: they are never tested against the
/// specification and never yielded. Each `next()` lists exactly the
/// directories it has to reach to produce the next match, so dropping the
/// iterator early stops all further backend calls.
///
/// The first error (from the backend or from `spec`) is yielded
/// once and ends the walk.
pub struct Walk<'a, B: ?Sized, S> {
    backend: &'a B,
    spec:    S,
    config:  WalkConfig,
    root:    Option<String>,
    stack:   Vec<Frame>,
    stats:   WalkStats,
    done:    bool,
}

impl<'a, B, S> Walk<'a, B, S>
where
    B: Backend + ?Sized,
    S: Specification,
{
    pub fn with_config(
        backend: &'a B,
        root:    impl Into<String>,
        spec:    S,
        config:  WalkConfig,
    ) -> Self {
        Self {
            backend,
            spec,
            config,
            root: Some(root.into()),
            stack: Vec::new(),
            stats: WalkStats::default(),
            done: false,
        }
    }

    /// Counters for the work done so far.
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    pub fn spec(&self) -> &S {
        &self.spec
    }

    /// List `path` and push its entries, which sit at `depth`.
    fn descend(&mut self, path: &str, depth: usize) -> Result<(), FindError> {
        debug!("Listing '{}' (depth {})", path, depth);
        self.stats.listings += 1;
        let entries = self.backend.list_children(path)?;
        self.stack.push(Frame {
            depth,
            entries: entries.into_iter(),
        });
        Ok(())
    }

    fn expands(&self, depth: usize) -> bool {
        !matches!(self.config.max_depth, Some(max) if depth >= max)
    }

    fn advance(&mut self) -> Option<Result<Entry, FindError>> {
        if let Some(root) = self.root.take() {
            if self.expands(0) {
                if let Err(err) = self.descend(&root, 1) {
                    return Some(Err(err));
                }
            }
        }

        loop {
            let frame = self.stack.last_mut()?;
            let depth = frame.depth;
            let Some(entry) = frame.entries.next() else {
                self.stack.pop();
                continue;
            };

            match entry.kind {
                EntryKind::Dir => {
                    self.stats.dirs += 1;
                    if !self.expands(depth) {
                        debug!("Depth limit reached, not listing '{}'", entry.path);
                        continue;
                    }
                    if let Err(err) = self.descend(&entry.path, depth + 1) {
                        return Some(Err(err));
                    }
                }
                EntryKind::File => {
                    self.stats.files += 1;
                    match self.spec.is_satisfied_by(&entry) {
                        Ok(true) => {
                            self.stats.matches += 1;
                            return Some(Ok(entry));
                        }
                        Ok(false) => trace!("Rejected '{}'", entry.path),
                        Err(err)  => return Some(Err(err)),
                    }
                }
            }
        }
    }
}

impl<B, S> Iterator for Walk<'_, B, S>
where
    B: Backend + ?Sized,
    S: Specification,
{
    type Item = Result<Entry, FindError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.advance();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
            self.stack.clear();
        }
        item
    }
}

impl<B, S> FusedIterator for Walk<'_, B, S>
where
    B: Backend + ?Sized,
    S: Specification,
{
}
