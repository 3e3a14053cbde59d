//! # treefind
//!
//! Lazy, composable file selection over any listable storage backend.
//!
//! treefind has two halves. [`Specification`] is a boolean test over one
//! [`Entry`]; every specification gets [`and`](Specification::and),
//! [`or`](Specification::or) and [`not`](Specification::not), and the
//! results are specifications too. [`walk`] takes a [`Backend`] that can
//! only list the direct children of a path, expands the tree depth-first,
//! and yields the non-directory entries the specification accepts, one at a
//! time.
//!
//! # Quick Start
//!
//! ```rust
//! use treefind::{walk, Entry, HasExtension, IsHidden, MemoryBackend, Specification};
//!
//! let backend = MemoryBackend::new()
//!     .with(Entry::dir("src"))
//!     .with(Entry::file("src/lib.rs"))
//!     .with(Entry::file("src/.scratch.rs"))
//!     .with(Entry::file("README.md"));
//!
//! let rust_sources = HasExtension::new(["rs"]).and(IsHidden.not());
//!
//! let found: Vec<String> = walk(&backend, "", rust_sources)
//!     .map(|r| r.map(|e| e.path))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(found, vec!["src/lib.rs"]);
//! ```
//!
//! # Custom Backends and Specifications
//!
//! Implement [`Backend`] to walk anything hierarchical:
//!
//! ```rust
//! use treefind::{Backend, Entry, FindError};
//!
//! struct Keys(Vec<&'static str>);
//!
//! impl Backend for Keys {
//!     fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError> {
//!         let prefix = if path.is_empty() { String::new() } else { format!("{path}/") };
//!         Ok(self.0
//!             .iter()
//!             .filter_map(|k| k.strip_prefix(prefix.as_str()).map(|rest| (k, rest)))
//!             .filter(|(_, rest)| !rest.is_empty() && !rest.contains('/'))
//!             .map(|(k, _)| Entry::file(*k))
//!             .collect())
//!     }
//! }
//! ```
//!
//! Implement [`Specification`] for custom matching logic:
//!
//! ```rust
//! use treefind::{Entry, FindError, Specification};
//!
//! struct NameContains(&'static str);
//!
//! impl Specification for NameContains {
//!     fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
//!         Ok(entry.basename().contains(self.0))
//!     }
//! }
//!
//! let spec = NameContains("invoice").or(NameContains("receipt"));
//! assert!(spec.is_satisfied_by(&Entry::file("2024/receipt_03.pdf")).unwrap());
//! ```
//!
//! # Early Stop
//!
//! The walk lists a directory only when it gets there, so `take(n)` or
//! `find()` on the iterator skips the rest of the tree entirely.

#![forbid(unsafe_code)]

pub mod backend;
pub mod builtin;
pub mod combinator;

mod entry;
mod error;
mod finder;
mod stats;
mod traits;
mod walker;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use backend::{LocalBackend, MemoryBackend};
pub use builtin::{from_fn, try_from_fn, HasExtension, InPath, IsHidden, MatchesGlob};
pub use combinator::{And, Not, Or};
pub use entry::{keys, Entry, EntryKind};
pub use error::FindError;
pub use finder::Finder;
pub use stats::WalkStats;
pub use traits::{Backend, Specification};
pub use walker::{walk, Walk, WalkConfig};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`Finder`] with no backend and default options.
pub fn finder() -> Finder {
    Finder::default()
}
