//! # App Runtime Library
//!
//! The composition root of the client application, exposed as a library for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **Registry-as-facade**: modules resolve each other by contract type only
//! - **Choreography**: state changes are announced on the bus, never pushed
//!   to known consumers
//! - **Plug-and-Play**: modules can be enabled/disabled via configuration
//!
//! ## Layout
//!
//! - `container/` - context facade and runtime configuration
//! - `lifecycle/` - module contract, registrar and composition root
//! - `modules/` - the application's session, clock, player and logger modules

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod container;
pub mod lifecycle;
pub mod modules;

pub use container::{AppContext, RuntimeConfig};
pub use lifecycle::{BootstrapError, CompositionRoot, Module, ModuleStatus, Registrar};

use modules::{ClockModule, PlayerModule, SessionModule, StatusLoggerModule};

/// Build the application's composition root with every standard module.
#[must_use]
pub fn compose(config: RuntimeConfig) -> CompositionRoot {
    CompositionRoot::new(config)
        .with_module(SessionModule)
        .with_module(ClockModule::system())
        .with_module(PlayerModule::default())
        .with_module(StatusLoggerModule::default())
}
