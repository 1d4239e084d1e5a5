//! Outbound adapters implementing the driven ports.
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no access-control logic.

pub mod persistence;
