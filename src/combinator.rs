//! The three combinators: [`And`], [`Or`] and [`Not`].
//!
//! Built through [`Specification::and`], [`Specification::or`] and
//! [`Specification::not`]; the constructors are public for callers who
//! prefer prefix form. Every combinator owns its operands, so a composite
//! always has all of them. Evaluation is left to right and short-circuits.

use crate::entry::Entry;
use crate::error::FindError;
use crate::traits::Specification;

/// Satisfied when both operands are satisfied by the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    left:  L,
    right: R,
}

impl<L, R> And<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }
}

impl<L: Specification, R: Specification> Specification for And<L, R> {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        Ok(self.left.is_satisfied_by(entry)? && self.right.is_satisfied_by(entry)?)
    }
}

/// Satisfied when either operand is satisfied by the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Or<L, R> {
    left:  L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }
}

impl<L: Specification, R: Specification> Specification for Or<L, R> {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        Ok(self.left.is_satisfied_by(entry)? || self.right.is_satisfied_by(entry)?)
    }
}

/// Satisfied when the inner specification is not.
///
/// An error from the inner specification is returned as is, never read as
/// "not satisfied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Not<S> {
    inner: S,
}

impl<S> Not<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Specification> Specification for Not<S> {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        self.inner.is_satisfied_by(entry).map(|satisfied| !satisfied)
    }
}
