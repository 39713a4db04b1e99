//! # Subscriber Side
//!
//! Listener handles and the subscribe/unsubscribe half of the bus.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use shared_types::{message_name, Message};
use tracing::debug;

use crate::publisher::{MessageBus, Slot};

type Callback<M> = dyn Fn(&M) -> anyhow::Result<()> + Send + Sync;

/// A subscriber callback for messages of type `M`.
///
/// Cloning is cheap and keeps identity: the bus matches listeners by
/// identity, so the same handle (or a clone of it) must be passed to
/// `unsubscribe`. Two listeners built from identical closures are distinct.
pub struct Listener<M: Message> {
    callback: Arc<Callback<M>>,
}

impl<M: Message> Listener<M> {
    /// Wrap a fallible callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&M) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callback that cannot fail.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&M) + Send + Sync + 'static,
    {
        Self::new(move |message| {
            callback(message);
            Ok(())
        })
    }

    pub(crate) fn call(&self, message: &M) -> anyhow::Result<()> {
        (self.callback)(message)
    }
}

impl<M: Message> Clone for Listener<M> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<M: Message> PartialEq for Listener<M> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<M: Message> Eq for Listener<M> {}

impl<M: Message> fmt::Debug for Listener<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("message_type", &message_name::<M>())
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

impl MessageBus {
    /// Subscribe `listener` to messages of type `M`.
    ///
    /// Creates the topic on first use. Subscribing the same listener twice
    /// is allowed and results in two deliveries per publish.
    pub fn subscribe<M: Message>(&self, listener: &Listener<M>) {
        let mut table = self.table.lock();
        let id = table.next_slot;
        table.next_slot += 1;

        let slots = table.topics.entry(TypeId::of::<M>()).or_default();
        slots.push(Slot {
            id,
            listener: Box::new(listener.clone()),
        });

        debug!(
            message_type = message_name::<M>(),
            subscribers = slots.len(),
            "Listener subscribed"
        );
    }

    /// Remove the first subscription matching `listener`.
    ///
    /// Returns `false` (and does nothing) when the topic or the listener is
    /// unknown. The topic itself is dropped once its last listener leaves.
    pub fn unsubscribe<M: Message>(&self, listener: &Listener<M>) -> bool {
        let topic = TypeId::of::<M>();
        let mut table = self.table.lock();

        let Some(slots) = table.topics.get_mut(&topic) else {
            return false;
        };
        let Some(position) = slots.iter().position(|slot| {
            slot.listener
                .downcast_ref::<Listener<M>>()
                .is_some_and(|candidate| candidate == listener)
        }) else {
            return false;
        };

        slots.remove(position);
        let remaining = slots.len();
        if remaining == 0 {
            table.topics.remove(&topic);
        }

        debug!(
            message_type = message_name::<M>(),
            remaining, "Listener unsubscribed"
        );
        true
    }

    /// Number of subscriptions currently held for `M`.
    #[must_use]
    pub fn subscriber_count<M: Message>(&self) -> usize {
        self.table
            .lock()
            .topics
            .get(&TypeId::of::<M>())
            .map_or(0, Vec::len)
    }

    /// Number of message types with at least one subscriber.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.table.lock().topics.len()
    }
}
