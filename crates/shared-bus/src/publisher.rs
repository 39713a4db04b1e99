//! # Publisher Side
//!
//! The bus itself and the delivery loop.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use shared_types::{message_name, ListenerFault, Message};
use tracing::{debug, error};

use crate::subscriber::Listener;

/// One subscription. `listener` always holds a `Listener<M>` for the topic
/// it is filed under.
pub(crate) struct Slot {
    pub(crate) id: u64,
    pub(crate) listener: Box<dyn Any + Send + Sync>,
}

/// Topic table guarded by the bus mutex.
///
/// Slot ids grow monotonically and slots are only ever appended or removed,
/// so every topic's list stays sorted by id.
#[derive(Default)]
pub(crate) struct TopicTable {
    pub(crate) next_slot: u64,
    pub(crate) topics: HashMap<TypeId, Vec<Slot>>,
}

/// Outcome of a single `publish` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Listeners that failed; already logged.
    pub faults: Vec<ListenerFault>,
}

impl PublishReport {
    /// Total listeners invoked, failed or not.
    #[must_use]
    pub fn invoked(&self) -> usize {
        self.delivered + self.faults.len()
    }

    /// True when no listener failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Synchronous publish/subscribe bus keyed by message type.
///
/// The mutex serialises mutation of the topic table; it is released before
/// each listener runs, so listeners may reenter the bus freely.
pub struct MessageBus {
    pub(crate) table: Mutex<TopicTable>,

    /// Total publish calls, including those with no subscribers.
    messages_published: AtomicU64,

    /// Total listener faults captured.
    faults_reported: AtomicU64,
}

impl MessageBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Mutex::new(TopicTable::default()),
            messages_published: AtomicU64::new(0),
            faults_reported: AtomicU64::new(0),
        }
    }

    /// Deliver `message` to every listener subscribed to `M`.
    ///
    /// Listeners run most-recently-subscribed first. Listeners subscribed
    /// while this delivery is running are not invoked by it; listeners
    /// removed before their turn are skipped. Nested publishes run to
    /// completion inside the listener that issued them.
    pub fn publish<M: Message>(&self, message: M) -> PublishReport {
        self.messages_published.fetch_add(1, Ordering::Relaxed);

        let topic = TypeId::of::<M>();
        let mut report = PublishReport::default();

        // Slots with an id at or above the ceiling are either already
        // delivered or were added after this publish began.
        let mut ceiling = {
            let table = self.table.lock();
            if !table.topics.contains_key(&topic) {
                debug!(message_type = message_name::<M>(), "No subscribers, message dropped");
                return report;
            }
            table.next_slot
        };

        while let Some((slot, listener)) = self.next_listener::<M>(topic, &mut ceiling) {
            match deliver(&listener, &message) {
                Ok(()) => report.delivered += 1,
                Err(reason) => {
                    let fault = ListenerFault {
                        message_type: message_name::<M>(),
                        slot,
                        reason,
                    };
                    error!(error = %fault, "Listener failed, continuing delivery");
                    self.faults_reported.fetch_add(1, Ordering::Relaxed);
                    report.faults.push(fault);
                }
            }
        }

        debug!(
            message_type = message_name::<M>(),
            delivered = report.delivered,
            faults = report.faults.len(),
            "Message published"
        );
        report
    }

    /// Find the highest-id slot below `ceiling` and lower the ceiling to it.
    fn next_listener<M: Message>(
        &self,
        topic: TypeId,
        ceiling: &mut u64,
    ) -> Option<(usize, Listener<M>)> {
        let table = self.table.lock();
        let slots = table.topics.get(&topic)?;

        let mut end = slots.partition_point(|slot| slot.id < *ceiling);
        while end > 0 {
            let index = end - 1;
            let slot = &slots[index];
            *ceiling = slot.id;
            if let Some(listener) = slot.listener.downcast_ref::<Listener<M>>() {
                return Some((index, listener.clone()));
            }
            end = index;
        }
        None
    }

    /// Get the total number of publish calls.
    #[must_use]
    pub fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }

    /// Get the total number of listener faults captured.
    #[must_use]
    pub fn faults_reported(&self) -> u64 {
        self.faults_reported.load(Ordering::Relaxed)
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one listener, converting both errors and panics into a reason string.
fn deliver<M: Message>(listener: &Listener<M>, message: &M) -> Result<(), String> {
    match panic::catch_unwind(AssertUnwindSafe(|| listener.call(message))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("{e:#}")),
        Err(payload) => Err(panic_reason(payload.as_ref())),
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("panicked: {text}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("panicked: {text}")
    } else {
        "panicked".to_string()
    }
}
