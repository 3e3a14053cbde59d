use std::rc::Rc;
use std::sync::Arc;

use crate::combinator::{And, Not, Or};
use crate::entry::Entry;
use crate::error::FindError;

/// A storage backend the walker can list.
///
/// The only primitive the walker needs is "give me the direct children of
/// this path". Anything hierarchical works: a local directory, an object
/// store with `/`-delimited keys, an archive, an in-memory fixture.
///
/// # Contract
///
/// - `path == ""` denotes the root.
/// - Only direct children are returned, in the order the walker should
///   visit them.
/// - An empty directory is `Ok(vec![])`, not an error.
/// - Errors are handed to the walk's consumer unchanged. The walker never
///   retries; put retry policy inside the backend if you want one.
///
/// # Example
///
/// ```rust
/// use treefind::{Backend, Entry, FindError};
///
/// struct Flat(Vec<&'static str>);
///
/// impl Backend for Flat {
///     fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError> {
///         if !path.is_empty() {
///             return Err(FindError::NotFound(path.to_string()));
///         }
///         Ok(self.0.iter().map(|name| Entry::file(*name)).collect())
///     }
/// }
/// ```
pub trait Backend {
    /// List the direct children of `path`.
    fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError> {
        (**self).list_children(path)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError> {
        (**self).list_children(path)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn list_children(&self, path: &str) -> Result<Vec<Entry>, FindError> {
        (**self).list_children(path)
    }
}

/// A composable test over a single [`Entry`].
///
/// Implement [`is_satisfied_by`](Specification::is_satisfied_by) for an
/// atomic rule; [`and`](Specification::and), [`or`](Specification::or) and
/// [`not`](Specification::not) come for free and return combinators that
/// are specifications themselves, so expressions nest to any depth.
///
/// Implementations must be pure: the same entry always gives the same
/// answer, and nothing about the entry is retained.
///
/// # Errors
///
/// Return `Err` when the entry violates a precondition of the rule (for
/// example a metadata key the rule needs is missing). The walker does not
/// catch it: the walk ends and the error reaches the caller.
///
/// # Example
///
/// ```rust
/// use treefind::{Entry, FindError, Specification};
///
/// struct LargerThan(u64);
///
/// impl Specification for LargerThan {
///     fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
///         let size = entry
///             .get("size")
///             .ok_or_else(|| FindError::predicate(&entry.path, "no size"))?
///             .parse::<u64>()
///             .map_err(|e| FindError::predicate(&entry.path, e.to_string()))?;
///         Ok(size > self.0)
///     }
/// }
///
/// let big = LargerThan(10);
/// let small_or_none = LargerThan(10).not();
/// let e = Entry::file("a.bin").with("size", "42");
/// assert!(big.is_satisfied_by(&e).unwrap());
/// assert!(!small_or_none.is_satisfied_by(&e).unwrap());
/// ```
pub trait Specification {
    /// Whether `entry` satisfies this specification.
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError>;

    /// Satisfied when both `self` and `other` are. `other` is only evaluated
    /// when `self` is satisfied.
    fn and<O: Specification>(self, other: O) -> And<Self, O>
    where
        Self: Sized,
    {
        And::new(self, other)
    }

    /// Satisfied when either `self` or `other` is. `other` is only evaluated
    /// when `self` is not satisfied.
    fn or<O: Specification>(self, other: O) -> Or<Self, O>
    where
        Self: Sized,
    {
        Or::new(self, other)
    }

    /// Satisfied when `self` is not. Errors pass through.
    #[allow(clippy::should_implement_trait)]
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not::new(self)
    }
}

impl<S: Specification + ?Sized> Specification for &S {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        (**self).is_satisfied_by(entry)
    }
}

impl<S: Specification + ?Sized> Specification for Box<S> {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        (**self).is_satisfied_by(entry)
    }
}

impl<S: Specification + ?Sized> Specification for Rc<S> {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        (**self).is_satisfied_by(entry)
    }
}

impl<S: Specification + ?Sized> Specification for Arc<S> {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        (**self).is_satisfied_by(entry)
    }
}
