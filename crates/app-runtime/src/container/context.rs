//! # Application Context
//!
//! The composition facade: one message bus and one typed registry per
//! registry kind, shared by every module through an `Arc<AppContext>`.
//!
//! Registration is not available here. Only the [`Registrar`] handed out
//! during the registration phase can write to the registries.
//!
//! [`Registrar`]: crate::lifecycle::Registrar

use std::sync::Arc;

use shared_bus::{Listener, MessageBus, PublishReport};
use shared_registry::TypedRegistry;
use shared_types::{CompositionResult, Message, RegistryKind};

/// Process-wide access point for registries and the bus.
pub struct AppContext {
    /// Message bus - the only way modules notify each other.
    bus: Arc<MessageBus>,
    /// State machines, one per category.
    state_machines: TypedRegistry,
    /// Long-lived services.
    services: TypedRegistry,
    /// Entity-like services.
    entity_services: TypedRegistry,
}

impl AppContext {
    /// Create an empty context. Only the composition root does this.
    pub(crate) fn new() -> Self {
        Self {
            bus: Arc::new(MessageBus::new()),
            state_machines: TypedRegistry::new(RegistryKind::StateMachine),
            services: TypedRegistry::new(RegistryKind::Service),
            entity_services: TypedRegistry::new(RegistryKind::EntityService),
        }
    }

    /// Get the message bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<MessageBus> {
        &self.bus
    }

    /// Subscribe `listener` to messages of type `M`.
    pub fn add_listener<M: Message>(&self, listener: &Listener<M>) {
        self.bus.subscribe(listener);
    }

    /// Remove the first subscription matching `listener`.
    pub fn remove_listener<M: Message>(&self, listener: &Listener<M>) -> bool {
        self.bus.unsubscribe(listener)
    }

    /// Publish `message` to every listener of `M`.
    pub fn publish<M: Message>(&self, message: M) -> PublishReport {
        self.bus.publish(message)
    }

    /// Look up the state machine registered under contract `C`.
    pub fn get_state_machine<C>(&self) -> CompositionResult<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.state_machines.lookup::<C>()
    }

    /// Look up the service registered under contract `C`.
    pub fn get_service<C>(&self) -> CompositionResult<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.services.lookup::<C>()
    }

    /// Look up the entity service registered under contract `C`.
    pub fn get_entity_service<C>(&self) -> CompositionResult<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.entity_services.lookup::<C>()
    }

    /// Names of the contracts registered in the registry of the given kind.
    #[must_use]
    pub fn registered_contracts(&self, kind: RegistryKind) -> Vec<&'static str> {
        self.registry(kind).contracts()
    }

    pub(crate) fn registry(&self, kind: RegistryKind) -> &TypedRegistry {
        match kind {
            RegistryKind::StateMachine => &self.state_machines,
            RegistryKind::Service => &self.services,
            RegistryKind::EntityService => &self.entity_services,
        }
    }
}
