//! Port contracts for the board core.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;

pub use gateway::{GatewayError, GatewayResult, MutationGateway};
