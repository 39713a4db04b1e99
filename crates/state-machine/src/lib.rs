//! # State Machine Engine
//!
//! A reusable transition procedure for the long-lived state machines of the
//! composition. Each machine owns one *category* of mutually exclusive
//! operating modes; every committed change is announced on the message bus.
//!
//! ## Engine Lifecycle
//!
//! ```text
//! [UNINITIALIZED] ──set_initial_state──→ [READY] ──transition_to──┐
//!                                           ↑                     │
//!                                           └─────────────────────┘
//! ```
//!
//! ## Transition Rules
//!
//! 1. An absent next state fails with `NullVariant`.
//! 2. The current state again is a no-op: warning, no message.
//! 3. A state from another category fails with `InvalidTransition`.
//! 4. Otherwise the change message is published and, once every listener
//!    has returned, the new state becomes current.
//! 5. If a listener committed another transition on the same machine during
//!    delivery, that nested state is kept and the outer call reports
//!    `Superseded`.
//!
//! ## Writing a Machine
//!
//! ```rust
//! use std::sync::Arc;
//! use shared_bus::MessageBus;
//! use state_machine::{Category, FiniteState, FiniteStateMachine};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Door { Open, Closed }
//!
//! impl FiniteState for Door {
//!     fn category(&self) -> Category { Category::new("Door") }
//! }
//!
//! let machine = FiniteStateMachine::<Door>::new("door", Arc::new(MessageBus::new()));
//! machine.set_initial_state(Door::Closed).unwrap();
//! machine.transition_to(Door::Open).unwrap();
//! assert_eq!(machine.current(), Some(Door::Open));
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod category;
pub mod engine;
pub mod machine;
pub mod message;

pub use category::{Category, FiniteState};
pub use engine::{EngineStatus, FiniteStateMachine, MessageFactory, Transition};
pub use machine::{ManagedMachine, StateMachine};
pub use message::StateChanged;
