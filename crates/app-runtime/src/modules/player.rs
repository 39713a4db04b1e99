//! # Player Entity Service
//!
//! Tracks the players spawned during the current session. The roster is
//! cleared whenever the session returns to `LoggedOut`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use shared_bus::{Listener, MessageBus};
use shared_types::Message;
use tracing::{debug, info};

use crate::container::AppContext;
use crate::lifecycle::{Module, Registrar};
use crate::modules::clock::Clock;
use crate::modules::session::{SessionChanged, SessionState};

/// Player identifier, unique within one directory.
pub type PlayerId = u64;

/// A spawned player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Spawn time in milliseconds since the Unix epoch, 0 without a clock.
    pub spawned_at: u64,
}

/// Published after a player joins the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSpawned {
    pub player: Player,
}

impl Message for PlayerSpawned {}

/// Contract under which the roster is registered.
pub trait PlayerRoster: Send + Sync {
    /// Add a player and announce it.
    fn spawn(&self, name: &str) -> Player;
    /// Look up a player.
    fn get(&self, id: PlayerId) -> Option<Player>;
    /// Number of players.
    fn count(&self) -> usize;
    /// Remove every player, returning how many were removed.
    fn clear(&self) -> usize;
}

/// In-memory [`PlayerRoster`].
pub struct PlayerDirectory {
    bus: Arc<MessageBus>,
    clock: OnceCell<Arc<dyn Clock>>,
    next_id: AtomicU64,
    players: RwLock<BTreeMap<PlayerId, Player>>,
}

impl PlayerDirectory {
    #[must_use]
    pub fn new(bus: Arc<MessageBus>) -> Self {
        Self {
            bus,
            clock: OnceCell::new(),
            next_id: AtomicU64::new(1),
            players: RwLock::new(BTreeMap::new()),
        }
    }

    /// Attach the time source used to stamp spawns. Only the first call wins.
    pub fn attach_clock(&self, clock: Arc<dyn Clock>) -> bool {
        self.clock.set(clock).is_ok()
    }
}

impl PlayerRoster for PlayerDirectory {
    fn spawn(&self, name: &str) -> Player {
        let player = Player {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            spawned_at: self.clock.get().map_or(0, |clock| clock.now_millis()),
        };
        self.players.write().insert(player.id, player.clone());

        debug!("[Players] Spawned {} as #{}", player.name, player.id);
        self.bus.publish(PlayerSpawned {
            player: player.clone(),
        });
        player
    }

    fn get(&self, id: PlayerId) -> Option<Player> {
        self.players.read().get(&id).cloned()
    }

    fn count(&self) -> usize {
        self.players.read().len()
    }

    fn clear(&self) -> usize {
        let mut players = self.players.write();
        let removed = players.len();
        players.clear();
        removed
    }
}

/// Registers the roster and clears it on log-out.
#[derive(Default)]
pub struct PlayerModule {
    directory: Mutex<Option<Arc<PlayerDirectory>>>,
}

impl Module for PlayerModule {
    fn name(&self) -> &'static str {
        "players"
    }

    fn register(&self, registrar: &mut Registrar<'_>) -> anyhow::Result<()> {
        let directory = Arc::new(PlayerDirectory::new(Arc::clone(registrar.bus())));
        let roster: Arc<dyn PlayerRoster> = directory.clone();
        registrar.register_entity_service::<dyn PlayerRoster>(roster)?;
        *self.directory.lock() = Some(directory);
        Ok(())
    }

    fn enable(&self, context: &Arc<AppContext>) -> anyhow::Result<()> {
        let Some(directory) = self.directory.lock().clone() else {
            anyhow::bail!("player directory was never registered");
        };

        if let Ok(clock) = context.get_service::<dyn Clock>() {
            directory.attach_clock(clock);
        }

        let roster: Weak<PlayerDirectory> = Arc::downgrade(&directory);
        context.add_listener(&Listener::from_fn(move |changed: &SessionChanged| {
            if changed.next != SessionState::LoggedOut {
                return;
            }
            if let Some(roster) = roster.upgrade() {
                let removed = roster.clear();
                info!("[Players] Session ended, removed {} players", removed);
            }
        }));
        Ok(())
    }
}
