//! # Module Contract
//!
//! Every long-lived subsystem of the application takes part in the
//! composition as a `Module`.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::container::{AppContext, ConfigError};
use crate::lifecycle::registrar::Registrar;

/// Trait that all modules must implement to join the composition.
pub trait Module: Send + Sync {
    /// Module name, also used as the configuration key.
    fn name(&self) -> &'static str;

    /// Registration phase: build instances and register them.
    ///
    /// State machines registered here get their initial state assigned by
    /// the startup sequence before any module is enabled.
    fn register(&self, registrar: &mut Registrar<'_>) -> anyhow::Result<()>;

    /// Enable phase: subscribe listeners and resolve collaborators.
    ///
    /// Runs after every module registered and every machine was initialized,
    /// so all `get_*` lookups are valid here.
    fn enable(&self, _context: &Arc<AppContext>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Module status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// Added but startup has not reached it yet.
    Pending,
    /// Registration succeeded.
    Registered,
    /// Machines registered by the module hold their initial state.
    Ready,
    /// Listeners wired; fully running.
    Enabled,
    /// Disabled by configuration.
    Disabled,
    /// Failed during startup.
    Failed,
}

/// Startup phase, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Registration of instances.
    Register,
    /// Initial state assignment.
    InitialState,
    /// Listener wiring.
    Enable,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => write!(f, "register"),
            Self::InitialState => write!(f, "initial state"),
            Self::Enable => write!(f, "enable"),
        }
    }
}

/// Startup errors.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration rejected before anything was built.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A module failed one of the startup phases.
    #[error("[{module}] {phase} failed: {source}")]
    Module {
        module: &'static str,
        phase: Phase,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BootstrapError {
    pub(crate) fn module(
        module: &'static str,
        phase: Phase,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Module {
            module,
            phase,
            source: source.into(),
        }
    }
}
