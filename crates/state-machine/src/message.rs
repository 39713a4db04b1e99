//! # State-Changed Message

use serde::Serialize;
use shared_types::Message;

use crate::category::FiniteState;

/// Announces a committed transition for the category of `S`.
///
/// `previous` is `None` only when the machine had no state yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateChanged<S> {
    pub previous: Option<S>,
    pub next: S,
}

impl<S: FiniteState> StateChanged<S> {
    /// Default message factory.
    #[must_use]
    pub fn new(previous: Option<S>, next: S) -> Self {
        Self { previous, next }
    }
}

impl<S: FiniteState> Message for StateChanged<S> {}
