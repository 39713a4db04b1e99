//! # Composition Root
//!
//! Owns the module list and builds the [`AppContext`] exactly once.
//!
//! ## Startup Sequence
//!
//! ```text
//! Phase 0: validate configuration
//! Phase 1: construct context (bus + registries)
//! Phase 2: register      - every enabled module, in insertion order
//! Phase 3: initial state - every machine queued during phase 2
//! Phase 4: enable        - every registered module, in insertion order
//! ```
//!
//! A failure in any phase marks the module `Failed` and aborts startup. The
//! context is only published once all phases succeed, so a later call to
//! [`CompositionRoot::initialize`] starts from scratch.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::Serialize;
use shared_types::{CompositionError, RegistryKind};
use tracing::{error, info, instrument, warn};

use crate::container::{AppContext, RuntimeConfig};
use crate::lifecycle::module::{BootstrapError, Module, ModuleStatus, Phase};
use crate::lifecycle::registrar::{PendingInitializer, Registrar};

/// Builds and owns the application composition.
pub struct CompositionRoot {
    config: RuntimeConfig,
    modules: Vec<Box<dyn Module>>,
    statuses: Mutex<Vec<ModuleStatus>>,
    context: OnceCell<Arc<AppContext>>,
}

impl CompositionRoot {
    /// Create a root with no modules.
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            modules: Vec::new(),
            statuses: Mutex::new(Vec::new()),
            context: OnceCell::new(),
        }
    }

    /// Builder-style [`CompositionRoot::add_module`].
    #[must_use]
    pub fn with_module(mut self, module: impl Module + 'static) -> Self {
        self.add_module(module);
        self
    }

    /// Append a module. Modules run each phase in insertion order.
    pub fn add_module(&mut self, module: impl Module + 'static) {
        self.modules.push(Box::new(module));
        self.statuses.get_mut().push(ModuleStatus::Pending);
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run the startup sequence, or return the context it already built.
    pub fn initialize(&self) -> Result<Arc<AppContext>, BootstrapError> {
        self.context
            .get_or_try_init(|| self.bootstrap())
            .map(Arc::clone)
    }

    /// Get the context if startup has completed.
    #[must_use]
    pub fn context(&self) -> Option<Arc<AppContext>> {
        self.context.get().cloned()
    }

    /// Status of the first module with the given name.
    #[must_use]
    pub fn module_status(&self, name: &str) -> Option<ModuleStatus> {
        let statuses = self.statuses.lock();
        self.modules
            .iter()
            .position(|module| module.name() == name)
            .map(|index| statuses[index])
    }

    /// Snapshot of module statuses, registries and bus counters.
    #[must_use]
    pub fn status_report(&self) -> StatusReport {
        let modules = {
            let statuses = self.statuses.lock();
            self.modules
                .iter()
                .zip(statuses.iter())
                .map(|(module, status)| ModuleReport {
                    name: module.name(),
                    status: *status,
                })
                .collect()
        };

        let mut report = StatusReport {
            initialized: false,
            modules,
            contracts: BTreeMap::new(),
            topics: 0,
            messages_published: 0,
            faults_reported: 0,
        };

        if let Some(context) = self.context.get() {
            report.initialized = true;
            for kind in RegistryKind::all() {
                report
                    .contracts
                    .insert(kind.name(), context.registered_contracts(kind));
            }
            report.topics = context.bus().topic_count();
            report.messages_published = context.bus().messages_published();
            report.faults_reported = context.bus().faults_reported();
        }

        report
    }

    #[instrument(name = "composition_init", skip(self))]
    fn bootstrap(&self) -> Result<Arc<AppContext>, BootstrapError> {
        info!("Initializing composition ({} modules)", self.modules.len());

        info!("Phase 0: Validating configuration");
        self.config.validate()?;
        self.statuses
            .lock()
            .iter_mut()
            .for_each(|status| *status = ModuleStatus::Pending);

        info!("Phase 1: Creating shared infrastructure");
        let context = AppContext::new();

        info!("Phase 2: Registering modules");
        let mut initializers = Vec::new();
        for (index, module) in self.modules.iter().enumerate() {
            let name = module.name();
            if !self.config.modules.is_enabled(name) {
                info!("  [{}] disabled by configuration", name);
                self.set_status(index, ModuleStatus::Disabled);
                continue;
            }

            let mut registrar = Registrar::new(index, name, &context, &mut initializers);
            if let Err(e) = module.register(&mut registrar) {
                return Err(self.fail(index, Phase::Register, e));
            }
            self.set_status(index, ModuleStatus::Registered);
            info!("  [{}] registered", name);
        }

        info!("Phase 3: Setting initial states");
        for PendingInitializer {
            index,
            module,
            machine,
            initialize,
        } in initializers
        {
            match initialize() {
                Ok(()) => info!("  [{}] {} initialized", module, machine),
                Err(CompositionError::AlreadyInitialized { current, .. }) => {
                    warn!("  [{}] {} already in {}, skipped", module, machine, current);
                }
                Err(e) => return Err(self.fail(index, Phase::InitialState, e)),
            }
        }
        self.promote(ModuleStatus::Registered, ModuleStatus::Ready);

        info!("Phase 4: Enabling modules");
        let context = Arc::new(context);
        for (index, module) in self.modules.iter().enumerate() {
            if self.statuses.lock()[index] != ModuleStatus::Ready {
                continue;
            }
            if let Err(e) = module.enable(&context) {
                return Err(self.fail(index, Phase::Enable, e));
            }
            self.set_status(index, ModuleStatus::Enabled);
            info!("  [{}] enabled", module.name());
        }

        info!("All modules started successfully");
        Ok(context)
    }

    fn set_status(&self, index: usize, status: ModuleStatus) {
        self.statuses.lock()[index] = status;
    }

    fn promote(&self, from: ModuleStatus, to: ModuleStatus) {
        self.statuses
            .lock()
            .iter_mut()
            .filter(|status| **status == from)
            .for_each(|status| *status = to);
    }

    fn fail(
        &self,
        index: usize,
        phase: Phase,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> BootstrapError {
        self.set_status(index, ModuleStatus::Failed);
        let err = BootstrapError::module(self.modules[index].name(), phase, source);
        error!("{}", err);
        err
    }
}

/// Serializable snapshot returned by [`CompositionRoot::status_report`].
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Whether startup has completed.
    pub initialized: bool,
    /// Module statuses in insertion order.
    pub modules: Vec<ModuleReport>,
    /// Registered contract names per registry.
    pub contracts: BTreeMap<&'static str, Vec<&'static str>>,
    /// Bus topics with at least one listener.
    pub topics: usize,
    /// Messages published since startup.
    pub messages_published: u64,
    /// Listener faults since startup.
    pub faults_reported: u64,
}

/// One module's entry in a [`StatusReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub name: &'static str,
    pub status: ModuleStatus,
}
