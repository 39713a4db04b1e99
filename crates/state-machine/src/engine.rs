//! # Transition Engine
//!
//! Validates, announces and commits state changes for one machine.
//!
//! The machine lock is never held while the change message is delivered:
//! listeners may query the machine (and see the *old* state) or drive further
//! transitions. The message itself is the source of truth for old/new.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use shared_bus::{MessageBus, PublishReport};
use shared_types::{CompositionError, CompositionResult, Message};
use tracing::{debug, error, info, warn};

use crate::category::FiniteState;
use crate::message::StateChanged;

/// Builds the category-specific change message from `(previous, next)`.
pub type MessageFactory<S, M> = fn(Option<S>, S) -> M;

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// No state assigned yet.
    Uninitialized,
    /// Holding a current state.
    Ready,
}

/// Outcome of a transition request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<S> {
    /// The change was announced and committed.
    Committed {
        previous: Option<S>,
        next: S,
        /// Delivery outcome of the change message.
        report: PublishReport,
    },
    /// The requested state was already current. Nothing was published.
    Unchanged(S),
    /// The change was announced, but a listener committed another transition
    /// on the same machine during delivery. The nested result is kept.
    Superseded {
        previous: Option<S>,
        next: S,
        /// State left by the nested transition.
        current: Option<S>,
        /// Delivery outcome of the change message.
        report: PublishReport,
    },
}

impl<S> Transition<S> {
    /// True when the state actually changed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

#[derive(Debug)]
struct Slots<S> {
    current: Option<S>,
    previous: Option<S>,
    /// Bumped on every write to `current`.
    generation: u64,
}

/// Finite-state-machine engine for states of type `S`, announcing changes as
/// messages of type `M`.
pub struct FiniteStateMachine<S: FiniteState, M: Message = StateChanged<S>> {
    name: String,
    bus: Arc<MessageBus>,
    factory: MessageFactory<S, M>,
    slots: Mutex<Slots<S>>,
    transitions: AtomicU64,
}

impl<S: FiniteState> FiniteStateMachine<S> {
    /// Create an engine announcing changes as [`StateChanged<S>`].
    pub fn new(name: impl Into<String>, bus: Arc<MessageBus>) -> Self {
        Self::with_factory(name, bus, StateChanged::new)
    }
}

impl<S: FiniteState, M: Message> FiniteStateMachine<S, M> {
    /// Create an engine with a custom message factory.
    pub fn with_factory(
        name: impl Into<String>,
        bus: Arc<MessageBus>,
        factory: MessageFactory<S, M>,
    ) -> Self {
        Self {
            name: name.into(),
            bus,
            factory,
            slots: Mutex::new(Slots {
                current: None,
                previous: None,
                generation: 0,
            }),
            transitions: AtomicU64::new(0),
        }
    }

    /// Assign the starting state. Publishes nothing.
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` if the machine already holds a state.
    pub fn set_initial_state(&self, initial: S) -> CompositionResult<()> {
        let mut slots = self.slots.lock();
        if let Some(current) = &slots.current {
            return Err(CompositionError::AlreadyInitialized {
                machine: self.name.clone(),
                current: format!("{current:?}"),
            });
        }

        debug!(machine = %self.name, state = ?initial, "Initial state set");
        slots.current = Some(initial);
        slots.generation += 1;
        Ok(())
    }

    /// Move to `next`.
    ///
    /// Returns `Transition::Unchanged` when `next` is already current, and
    /// `Transition::Superseded` when a listener committed another transition
    /// on this machine while `next` was being announced. In that case the
    /// nested state stays current, so the last announced state always
    /// matches `current()`.
    ///
    /// # Errors
    ///
    /// - `NullVariant` when `next` is `None`.
    /// - `InvalidTransition` when `next` belongs to another category than the
    ///   current state. The current state is left untouched.
    pub fn transition_to(&self, next: impl Into<Option<S>>) -> CompositionResult<Transition<S>> {
        let Some(next) = next.into() else {
            return Err(CompositionError::NullVariant {
                machine: self.name.clone(),
            });
        };

        let (previous, generation) = {
            let slots = self.slots.lock();
            if let Some(current) = &slots.current {
                if *current == next {
                    warn!(machine = %self.name, state = ?next, "Already in requested state, ignoring");
                    return Ok(Transition::Unchanged(next));
                }

                let (from, to) = (current.category(), next.category());
                if from != to {
                    error!(
                        machine = %self.name,
                        from = ?current,
                        to = ?next,
                        "Rejected transition across categories"
                    );
                    return Err(CompositionError::InvalidTransition {
                        machine: self.name.clone(),
                        from: format!("{current:?}"),
                        from_category: from.name(),
                        to: format!("{next:?}"),
                        to_category: to.name(),
                    });
                }
            }
            (slots.current.clone(), slots.generation)
        };

        let report = self
            .bus
            .publish((self.factory)(previous.clone(), next.clone()));

        {
            let mut slots = self.slots.lock();
            if slots.generation != generation {
                let current = slots.current.clone();
                drop(slots);
                warn!(
                    machine = %self.name,
                    announced = ?next,
                    current = ?current,
                    "Superseded by a transition made during delivery, keeping it"
                );
                return Ok(Transition::Superseded {
                    previous,
                    next,
                    current,
                    report,
                });
            }
            slots.previous = previous.clone();
            slots.current = Some(next.clone());
            slots.generation += 1;
        }
        self.transitions.fetch_add(1, Ordering::Relaxed);

        info!(machine = %self.name, state = ?next, "State changed");
        Ok(Transition::Committed {
            previous,
            next,
            report,
        })
    }

    /// Get the current state.
    #[must_use]
    pub fn current(&self) -> Option<S> {
        self.slots.lock().current.clone()
    }

    /// Get the state before the last committed transition.
    #[must_use]
    pub fn previous(&self) -> Option<S> {
        self.slots.lock().previous.clone()
    }

    /// Get the engine lifecycle status.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        if self.slots.lock().current.is_some() {
            EngineStatus::Ready
        } else {
            EngineStatus::Uninitialized
        }
    }

    /// Get the number of committed transitions.
    #[must_use]
    pub fn transitions(&self) -> u64 {
        self.transitions.load(Ordering::Relaxed)
    }

    /// Get the machine name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the bus this machine announces on.
    #[must_use]
    pub fn bus(&self) -> &Arc<MessageBus> {
        &self.bus
    }
}
