//! # Shared Registry - Type-Keyed Instance Store
//!
//! Maps a *contract type* (usually a trait object type such as `dyn Clock`)
//! to exactly one shared instance implementing it. The facade holds three of
//! these, one per [`RegistryKind`], with identical semantics.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use shared_registry::TypedRegistry;
//! use shared_types::RegistryKind;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct FixedClock(u64);
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 { self.0 }
//! }
//!
//! let registry = TypedRegistry::new(RegistryKind::Service);
//! let clock: Arc<dyn Clock> = Arc::new(FixedClock(42));
//! registry.register::<dyn Clock>(clock).unwrap();
//!
//! assert_eq!(registry.lookup::<dyn Clock>().unwrap().now(), 42);
//! ```
//!
//! ## Rules
//!
//! - One entry per contract type; a second registration replaces the first.
//! - Registering `None` fails with `NullInstance` and keeps the old entry.
//! - Looking up a missing contract fails with `NotRegistered`.
//! - There is no removal.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::{CompositionError, CompositionResult, RegistryKind};
use tracing::{info, warn};

/// Entry for a registered contract.
struct Entry {
    /// Contract type name, kept for diagnostics.
    contract: &'static str,
    /// Always an `Arc<C>` for the contract `C` this entry is keyed by.
    instance: Box<dyn Any + Send + Sync>,
}

/// Type-keyed registry holding one shared instance per contract type.
pub struct TypedRegistry {
    kind: RegistryKind,
    entries: RwLock<HashMap<TypeId, Entry>>,
}

impl TypedRegistry {
    /// Create an empty registry of the given kind.
    #[must_use]
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Which registry this is.
    #[must_use]
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Register `instance` under contract `C`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// `NullInstance` when `instance` is `None`; the previous entry, if any,
    /// is left in place.
    pub fn register<C>(&self, instance: impl Into<Option<Arc<C>>>) -> CompositionResult<()>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let contract = type_name::<C>();
        let Some(instance) = instance.into() else {
            return Err(CompositionError::NullInstance {
                registry: self.kind,
                contract,
            });
        };

        let previous = self.entries.write().insert(
            TypeId::of::<C>(),
            Entry {
                contract,
                instance: Box::new(instance),
            },
        );

        if previous.is_some() {
            warn!(registry = %self.kind, contract, "Contract already registered, replacing");
        } else {
            info!(registry = %self.kind, contract, "Contract registered");
        }
        Ok(())
    }

    /// Get the instance registered under contract `C`.
    ///
    /// # Errors
    ///
    /// `NotRegistered` when nothing was registered for `C`.
    pub fn lookup<C>(&self) -> CompositionResult<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.entries
            .read()
            .get(&TypeId::of::<C>())
            .and_then(|entry| entry.instance.downcast_ref::<Arc<C>>())
            .cloned()
            .ok_or_else(|| CompositionError::NotRegistered {
                registry: self.kind,
                contract: type_name::<C>(),
            })
    }

    /// Check if a contract is registered.
    #[must_use]
    pub fn contains<C>(&self) -> bool
    where
        C: ?Sized + 'static,
    {
        self.entries.read().contains_key(&TypeId::of::<C>())
    }

    /// Number of registered contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Names of all registered contracts, sorted.
    #[must_use]
    pub fn contracts(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.read().values().map(|e| e.contract).collect();
        names.sort_unstable();
        names
    }
}
