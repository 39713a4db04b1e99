//! # Registrar
//!
//! Write access to the registries, handed to each module during the
//! registration phase and dropped before anything is enabled.

use std::sync::Arc;

use shared_bus::MessageBus;
use shared_types::{CompositionResult, RegistryKind};
use state_machine::ManagedMachine;
use tracing::debug;

use crate::container::AppContext;

type Initialize = Box<dyn FnOnce() -> CompositionResult<()> + Send>;

/// Deferred initial-state assignment for one registered machine.
pub(crate) struct PendingInitializer {
    /// Position of the owning module in the root's module list.
    pub(crate) index: usize,
    pub(crate) module: &'static str,
    pub(crate) machine: String,
    pub(crate) initialize: Initialize,
}

/// Bootstrap-only registration handle.
pub struct Registrar<'a> {
    index: usize,
    module: &'static str,
    context: &'a AppContext,
    initializers: &'a mut Vec<PendingInitializer>,
}

impl<'a> Registrar<'a> {
    pub(crate) fn new(
        index: usize,
        module: &'static str,
        context: &'a AppContext,
        initializers: &'a mut Vec<PendingInitializer>,
    ) -> Self {
        Self {
            index,
            module,
            context,
            initializers,
        }
    }

    /// Name of the module currently registering.
    #[must_use]
    pub fn module(&self) -> &'static str {
        self.module
    }

    /// The message bus, for machines and services that publish.
    #[must_use]
    pub fn bus(&self) -> &Arc<MessageBus> {
        self.context.bus()
    }

    /// Register a state machine under contract `C`.
    ///
    /// The machine's initial state is assigned after every module has
    /// registered. `None` fails with `NullInstance`.
    pub fn register_state_machine<C>(
        &mut self,
        machine: impl Into<Option<Arc<C>>>,
    ) -> CompositionResult<()>
    where
        C: ?Sized + ManagedMachine + 'static,
    {
        let machine = machine.into();
        let pending = machine.clone();

        self.context
            .registry(RegistryKind::StateMachine)
            .register::<C>(machine)?;

        if let Some(machine) = pending {
            let name = machine.machine_name().to_string();
            debug!("[{}] Queued initial state for {}", self.module, name);
            self.initializers.push(PendingInitializer {
                index: self.index,
                module: self.module,
                machine: name,
                initialize: Box::new(move || machine.initialize()),
            });
        }
        Ok(())
    }

    /// Register a service under contract `C`.
    pub fn register_service<C>(&mut self, service: impl Into<Option<Arc<C>>>) -> CompositionResult<()>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.context
            .registry(RegistryKind::Service)
            .register::<C>(service)
    }

    /// Register an entity service under contract `C`.
    pub fn register_entity_service<C>(
        &mut self,
        service: impl Into<Option<Arc<C>>>,
    ) -> CompositionResult<()>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.context
            .registry(RegistryKind::EntityService)
            .register::<C>(service)
    }
}
