//! # Shared Types Crate
//!
//! This crate contains the contracts every other crate in the workspace agrees
//! on: the error taxonomy, the `Message` marker trait used as a bus topic key,
//! and the `RegistryKind` tag naming the three typed registries.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-crate types are defined here and only here.
//! - **Fail Fast**: Every error is a programmer or configuration error and names
//!   the offending type.
//! - **Isolated Delivery**: A `ListenerFault` describes a failed delivery; it is
//!   reported, never returned to the publisher.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod errors;
pub mod message;
pub mod registry_kind;

pub use errors::*;
pub use message::{message_name, Message};
pub use registry_kind::RegistryKind;
