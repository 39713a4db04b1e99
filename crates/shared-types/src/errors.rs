//! # Error Types
//!
//! Defines error types used across the registry, bus and state machine crates.

use thiserror::Error;

use crate::registry_kind::RegistryKind;

/// Errors raised by the composition core.
///
/// All of these are usage errors. None are retried; the caller aborts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// An absent instance was offered for registration.
    #[error("Null instance: cannot register an absent {contract} in the {registry} registry")]
    NullInstance {
        registry: RegistryKind,
        contract: &'static str,
    },

    /// Lookup for a contract type with no entry.
    #[error("Not registered: no {contract} in the {registry} registry")]
    NotRegistered {
        registry: RegistryKind,
        contract: &'static str,
    },

    /// A transition was requested with an absent next state.
    #[error("Null variant: {machine} was asked to transition to an absent state")]
    NullVariant { machine: String },

    /// The next state belongs to a different category than the current one.
    #[error(
        "Invalid transition on {machine}: {from} ({from_category}) -> {to} ({to_category})"
    )]
    InvalidTransition {
        machine: String,
        from: String,
        from_category: &'static str,
        to: String,
        to_category: &'static str,
    },

    /// The initial state was assigned a second time.
    #[error("Already initialized: {machine} is already in state {current}")]
    AlreadyInitialized { machine: String, current: String },
}

/// Result alias for composition operations.
pub type CompositionResult<T> = Result<T, CompositionError>;

/// A subscriber callback failed during delivery.
///
/// Captured by the bus and logged; delivery continues to the remaining
/// subscribers and the publisher never sees it as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Listener fault on {message_type} (slot {slot}): {reason}")]
pub struct ListenerFault {
    /// Message type being delivered.
    pub message_type: &'static str,
    /// Index of the failing listener in the subscriber list at delivery time.
    pub slot: usize,
    /// Error text, or the panic payload when the listener panicked.
    pub reason: String,
}
