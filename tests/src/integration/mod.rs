//! # Integration Flows
//!
//! Each module exercises one building block through its public API, wired to
//! the others the way the application wires them.

pub mod bus_flows;
pub mod registry_flows;
