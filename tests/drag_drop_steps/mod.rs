//! Step definitions shared by drag-and-drop behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
