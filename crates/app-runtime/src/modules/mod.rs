//! # Application Modules
//!
//! | Module | Registry | Contract |
//! |--------|----------|----------|
//! | `session` | state machine | [`SessionMachine`] |
//! | `clock` | service | [`Clock`] |
//! | `players` | entity service | [`PlayerRoster`] |
//! | `status-logger` | none (consumer only) | - |

pub mod clock;
pub mod player;
pub mod session;
pub mod status_logger;

pub use clock::{Clock, ClockModule, FixedClock, SystemClock};
pub use player::{Player, PlayerDirectory, PlayerId, PlayerModule, PlayerRoster, PlayerSpawned};
pub use session::{Session, SessionChanged, SessionMachine, SessionModule, SessionState, SESSION};
pub use status_logger::{StatusEntry, StatusHistory, StatusLoggerModule, HISTORY_CAPACITY};
