//! # Registry Kinds
//!
//! The composition facade owns one typed registry per kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the three typed registries an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryKind {
    /// State machines (one per category).
    StateMachine,
    /// Long-lived services.
    Service,
    /// Entity-like services.
    EntityService,
}

impl RegistryKind {
    /// Get the registry name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateMachine => "state-machine",
            Self::Service => "service",
            Self::EntityService => "entity-service",
        }
    }

    /// Get all registry kinds.
    #[must_use]
    pub fn all() -> [RegistryKind; 3] {
        [Self::StateMachine, Self::Service, Self::EntityService]
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
