//! # Shared Bus - Typed Message Bus
//!
//! Publish/subscribe keyed by message type. Every module in the composition
//! exchanges notifications through one `MessageBus` owned by the facade.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Module A    │                    │  Module B    │
//! │              │    publish(M)      │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │ Listener<M>
//!                  │ MessageBus   │          │
//!                  │  topic = M   │ ─────────┘
//!                  └──────────────┘  subscribe(M)
//! ```
//!
//! ## Delivery Rules
//!
//! - **Synchronous:** `publish` returns only after every listener ran.
//! - **Last-subscribed-first:** listeners run in reverse subscription order.
//! - **Reentrant:** a listener may subscribe, unsubscribe or publish while a
//!   delivery is in progress. No lock is held across a listener call.
//! - **Isolated:** a listener error or panic becomes a `ListenerFault`; the
//!   remaining listeners still run and the publisher never sees an `Err`.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod publisher;
pub mod subscriber;

pub use publisher::{MessageBus, PublishReport};
pub use subscriber::Listener;
