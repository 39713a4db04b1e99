//! # Composition Container
//!
//! Holds the shared infrastructure every module reaches through: the message
//! bus, the three typed registries, and the runtime configuration.
//!
//! ## Thread Safety
//!
//! - The context is shared as `Arc<AppContext>`
//! - Registries and the bus each guard their own state with one lock
//! - No lock is held while a listener runs

pub mod config;
pub mod context;

pub use config::{ConfigError, LoggingConfig, ModuleConfig, RuntimeConfig};
pub use context::AppContext;
