//! # Composition Runtime Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/        # Cross-crate flows
//!     ├── registry_flows.rs  # Typed registry contract
//!     ├── bus_flows.rs       # Delivery order, isolation, reentrancy
//!     └── session_flows.rs   # State machine over the bus
//!
//! tests/benches/
//! └── bus_benchmarks.rs   # Publish and lookup throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p composition-tests
//!
//! # By area
//! cargo test -p composition-tests integration::bus_flows::
//!
//! # Benchmarks
//! cargo bench -p composition-tests
//! ```

#![allow(dead_code)]

pub mod integration;
