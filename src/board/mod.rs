//! Task board lifecycle and drag-and-drop reconciliation.
//!
//! This module owns the three pieces of the board core: the closed status
//! vocabulary, the role-gated transition policy, and the reconciliation
//! controller that keeps an optimistically updated board consistent with
//! the authoritative store behind the mutation gateway. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the pure policy engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
