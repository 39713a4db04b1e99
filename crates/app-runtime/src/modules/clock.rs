//! # Clock Service
//!
//! Wall-clock time behind a contract, so collaborators can be handed a
//! fixed clock in tests.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::lifecycle::{Module, Registrar};

/// Time source contract.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// Registers a [`Clock`] service.
pub struct ClockModule {
    clock: Arc<dyn Clock>,
}

impl ClockModule {
    /// Register the system wall clock.
    #[must_use]
    pub fn system() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Register the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Module for ClockModule {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn register(&self, registrar: &mut Registrar<'_>) -> anyhow::Result<()> {
        registrar.register_service::<dyn Clock>(Arc::clone(&self.clock))?;
        Ok(())
    }
}
