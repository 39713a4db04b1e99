//! # Categories and Finite States
//!
//! A category is a family of mutually exclusive modes; a finite state is one
//! immutable value of exactly one category. A machine typed on a
//! single-category enum can never see a foreign state. A state type that spans
//! several categories (an enum of per-category enums) gets the same guarantee
//! at runtime through [`FiniteState::category`].

use serde::Serialize;
use std::fmt;

/// Category discriminant checked on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category(&'static str);

impl Category {
    /// Create a category with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Get the category name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One variant of a category.
///
/// Values are compared with `PartialEq` to detect no-op transitions and are
/// cloned into the change message, so they should be small and data-less.
pub trait FiniteState: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Category this value belongs to.
    fn category(&self) -> Category;
}
