//! # Status Logger
//!
//! Pure consumer: logs every session change with a timestamp from the
//! registered clock and keeps a short history for diagnostics.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use shared_bus::Listener;
use tracing::info;

use crate::container::AppContext;
use crate::lifecycle::{Module, Registrar};
use crate::modules::clock::Clock;
use crate::modules::session::{SessionChanged, SessionState};

/// Entries kept before the oldest is dropped.
pub const HISTORY_CAPACITY: usize = 64;

/// One observed session change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub at: u64,
    pub previous: Option<SessionState>,
    pub next: SessionState,
}

/// Shared handle to the observed changes.
#[derive(Debug, Clone, Default)]
pub struct StatusHistory {
    entries: Arc<Mutex<VecDeque<StatusEntry>>>,
}

impl StatusHistory {
    /// Changes observed so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<StatusEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn record(&self, entry: StatusEntry) {
        let mut entries = self.entries.lock();
        if entries.len() == HISTORY_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

/// Logs session changes.
#[derive(Default)]
pub struct StatusLoggerModule {
    history: StatusHistory,
}

impl StatusLoggerModule {
    /// Handle that stays readable after the module moves into the root.
    #[must_use]
    pub fn history(&self) -> StatusHistory {
        self.history.clone()
    }
}

impl Module for StatusLoggerModule {
    fn name(&self) -> &'static str {
        "status-logger"
    }

    fn register(&self, _registrar: &mut Registrar<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn enable(&self, context: &Arc<AppContext>) -> anyhow::Result<()> {
        let clock = context.get_service::<dyn Clock>()?;
        let history = self.history.clone();

        context.add_listener(&Listener::from_fn(move |changed: &SessionChanged| {
            let entry = StatusEntry {
                at: clock.now_millis(),
                previous: changed.previous,
                next: changed.next,
            };
            info!(
                "[StatusLogger] {:?} -> {:?} at {}",
                entry.previous, entry.next, entry.at
            );
            history.record(entry);
        }));
        Ok(())
    }
}
