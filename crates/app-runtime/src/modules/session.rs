//! # Session Module
//!
//! The session state machine: whether the user is logged out, on the
//! login screen, or in the main application.
//!
//! ```text
//! [LOGGED_OUT] ──enter_login──→ [LOGIN] ──enter_main──→ [MAIN]
//!       ↑                          ↑                       │
//!       │                          └──────enter_login──────┤
//!       └───────────────────log_out────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use shared_bus::MessageBus;
use shared_types::CompositionResult;
use state_machine::{
    Category, FiniteState, FiniteStateMachine, ManagedMachine, StateChanged, StateMachine,
    Transition,
};

use crate::lifecycle::{Module, Registrar};

/// Session category.
pub const SESSION: Category = Category::new("Session");

/// Session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    LoggedOut,
    Login,
    Main,
}

impl FiniteState for SessionState {
    fn category(&self) -> Category {
        SESSION
    }
}

/// Published on every committed session change.
pub type SessionChanged = StateChanged<SessionState>;

/// Contract under which the session machine is registered.
pub trait SessionMachine: ManagedMachine {
    /// Show the login screen.
    fn enter_login(&self) -> CompositionResult<Transition<SessionState>>;
    /// Enter the main application.
    fn enter_main(&self) -> CompositionResult<Transition<SessionState>>;
    /// End the session.
    fn log_out(&self) -> CompositionResult<Transition<SessionState>>;
    /// Get the current state.
    fn state(&self) -> Option<SessionState>;
    /// Get the state before the last committed change.
    fn previous_state(&self) -> Option<SessionState>;
}

/// Engine-backed [`SessionMachine`].
pub struct Session {
    engine: FiniteStateMachine<SessionState>,
}

impl Session {
    #[must_use]
    pub fn new(bus: Arc<MessageBus>) -> Self {
        Self {
            engine: FiniteStateMachine::new("session", bus),
        }
    }
}

impl StateMachine for Session {
    type State = SessionState;
    type Changed = SessionChanged;

    fn engine(&self) -> &FiniteStateMachine<SessionState> {
        &self.engine
    }

    fn initial_state(&self) -> SessionState {
        SessionState::LoggedOut
    }
}

impl SessionMachine for Session {
    fn enter_login(&self) -> CompositionResult<Transition<SessionState>> {
        self.engine.transition_to(SessionState::Login)
    }

    fn enter_main(&self) -> CompositionResult<Transition<SessionState>> {
        self.engine.transition_to(SessionState::Main)
    }

    fn log_out(&self) -> CompositionResult<Transition<SessionState>> {
        self.engine.transition_to(SessionState::LoggedOut)
    }

    fn state(&self) -> Option<SessionState> {
        self.engine.current()
    }

    fn previous_state(&self) -> Option<SessionState> {
        self.engine.previous()
    }
}

/// Registers the session machine.
pub struct SessionModule;

impl Module for SessionModule {
    fn name(&self) -> &'static str {
        "session"
    }

    fn register(&self, registrar: &mut Registrar<'_>) -> anyhow::Result<()> {
        let session: Arc<dyn SessionMachine> = Arc::new(Session::new(Arc::clone(registrar.bus())));
        registrar.register_state_machine::<dyn SessionMachine>(session)?;
        Ok(())
    }
}
