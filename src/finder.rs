use crate::error::FindError;
use crate::traits::{Backend, Specification};
use crate::walker::{Walk, WalkConfig};

// ---------------------------------------------------------------------------
// Finder
// ---------------------------------------------------------------------------

/// The `find` operation, packaged for a host that dispatches by name.
///
/// Created via [`treefind::finder()`](crate::finder). A host injects the
/// backend with [`backend()`](Finder::backend) or
/// [`set_backend()`](Finder::set_backend), looks the operation up by
/// [`Finder::METHOD`], and invokes [`handle()`](Finder::handle) with a
/// caller-supplied specification.
///
/// # Example
///
/// ```rust
/// use treefind::{Entry, HasExtension, MemoryBackend, Specification, IsHidden};
///
/// let backend: MemoryBackend = [
///     Entry::file("a.rs"),
///     Entry::file(".b.rs"),
///     Entry::file("c.md"),
/// ]
/// .into_iter()
/// .collect();
///
/// let finder = treefind::finder().backend(backend);
/// assert_eq!(finder.method(), "find");
///
/// let spec = HasExtension::new(["rs"]).and(IsHidden.not());
/// let paths: Vec<String> = finder
///     .handle(spec)
///     .unwrap()
///     .map(|r| r.unwrap().path)
///     .collect();
///
/// assert_eq!(paths, vec!["a.rs"]);
/// ```
#[derive(Default)]
pub struct Finder {
    backend: Option<Box<dyn Backend>>,
    config:  WalkConfig,
}

impl Finder {
    /// The name a host registers this operation under.
    pub const METHOD: &'static str = "find";

    pub fn method(&self) -> &'static str {
        Self::METHOD
    }

    // ── Backend ───────────────────────────────────────────────────────────

    /// Set the backend to walk.
    pub fn backend(mut self, b: impl Backend + 'static) -> Self {
        self.set_backend(b);
        self
    }

    /// Inject or replace the backend in place.
    pub fn set_backend(&mut self, b: impl Backend + 'static) {
        self.backend = Some(Box::new(b));
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Maximum traversal depth. See [`WalkConfig::max_depth`].
    pub fn max_depth(mut self, d: usize) -> Self {
        self.config.max_depth = Some(d);
        self
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Walk the whole backend from its root.
    ///
    /// # Errors
    ///
    /// Returns `Err` when no backend has been provided. Listing and
    /// evaluation errors arrive through the returned iterator.
    pub fn handle<S: Specification>(&self, spec: S) -> Result<Walk<'_, dyn Backend, S>, FindError> {
        self.find("", spec)
    }

    /// Walk the subtree under `root`.
    ///
    /// # Errors
    ///
    /// Same as [`handle()`](Finder::handle).
    pub fn find<S: Specification>(
        &self,
        root: impl Into<String>,
        spec: S,
    ) -> Result<Walk<'_, dyn Backend, S>, FindError> {
        let backend = self
            .backend
            .as_deref()
            .ok_or_else(|| FindError::InvalidConfig("no backend provided".into()))?;

        Ok(Walk::with_config(backend, root, spec, self.config))
    }
}
