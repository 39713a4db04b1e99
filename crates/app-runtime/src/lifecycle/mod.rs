//! # Module Lifecycle
//!
//! Modules join the composition through two hooks. Registration happens
//! first and is the only time the registries accept writes; enabling
//! happens last, once every contract can be resolved.

pub mod module;
pub mod registrar;
pub mod root;

pub use module::{BootstrapError, Module, ModuleStatus, Phase};
pub use registrar::Registrar;
pub use root::{CompositionRoot, ModuleReport, StatusReport};
