//! Trestle: task board core for a team collaboration tool.
//!
//! This crate implements the task lifecycle state machine and the
//! drag-and-drop board synchronisation engine: the rules deciding which
//! status transitions a task may undergo, who may perform them, and how an
//! optimistic client-side move is reconciled with an asynchronous,
//! possibly-rejected server confirmation.
//!
//! # Architecture
//!
//! Trestle follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory gateway, etc.)
//!
//! # Modules
//!
//! - [`board`]: Status domain, transition policy, and board reconciliation

pub mod board;
