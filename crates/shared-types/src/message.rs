//! # Message Marker
//!
//! A message is a concrete, immutable data shape used both as a bus topic key
//! and as the payload carried to subscribers.

/// Marker for types that may travel over the message bus.
///
/// The concrete type is the topic: subscribers to `M` only ever see values of
/// `M`. Implementations are expected to be immutable after construction.
pub trait Message: Send + Sync + 'static {}

/// Human-readable name of a message type, used in logs and faults.
#[must_use]
pub fn message_name<M: Message>() -> &'static str {
    std::any::type_name::<M>()
}
