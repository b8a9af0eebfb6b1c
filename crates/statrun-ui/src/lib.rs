//! Terminal UI components for the statrun system.
//!
//! Provides Ayu-themed color styling for signatures, results and errors,
//! and terminal detection for deciding when to color.

pub mod styles;
pub mod terminal;
