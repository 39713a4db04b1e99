//! # Concrete Machine Contract
//!
//! What every concrete state machine supplies on top of the engine: its
//! starting state and access to the engine that holds its category. Public
//! operations ("enter login", "enter main") are thin wrappers around
//! `transition_to` on the concrete type.

use shared_types::{CompositionResult, Message};

use crate::category::FiniteState;
use crate::engine::{EngineStatus, FiniteStateMachine};

/// A concrete state machine built on [`FiniteStateMachine`].
pub trait StateMachine: Send + Sync + 'static {
    /// Variant set of this machine's category.
    type State: FiniteState;
    /// Message announcing a change.
    type Changed: Message;

    /// The engine driving this machine.
    fn engine(&self) -> &FiniteStateMachine<Self::State, Self::Changed>;

    /// State assigned by [`StateMachine::set_initial_state`].
    fn initial_state(&self) -> Self::State;

    /// Assign the initial state. Called once by the startup sequence.
    fn set_initial_state(&self) -> CompositionResult<()> {
        self.engine().set_initial_state(self.initial_state())
    }

    /// Get the current state.
    fn current(&self) -> Option<Self::State> {
        self.engine().current()
    }

    /// Get the engine lifecycle status.
    fn status(&self) -> EngineStatus {
        self.engine().status()
    }
}

/// Object-safe view of a machine.
///
/// Contract traits extend this so the startup sequence can assign initial
/// states through whatever trait object a machine was registered under.
pub trait ManagedMachine: Send + Sync {
    /// Machine name used in diagnostics.
    fn machine_name(&self) -> &str;

    /// Assign the initial state.
    fn initialize(&self) -> CompositionResult<()>;

    /// Get the engine lifecycle status.
    fn engine_status(&self) -> EngineStatus;
}

impl<T: StateMachine> ManagedMachine for T {
    fn machine_name(&self) -> &str {
        self.engine().name()
    }

    fn initialize(&self) -> CompositionResult<()> {
        self.set_initial_state()
    }

    fn engine_status(&self) -> EngineStatus {
        self.status()
    }
}
