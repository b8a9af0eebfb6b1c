//! Statistics formulas for the statrun system.
//!
//! [`stats`] is the provider the CLI builds its catalog from. The formula
//! bodies are plain functions over slices and scalars, usable on their own.

pub mod descriptive;
pub mod discrete;
pub mod normal;
mod provider;
pub mod special;

pub use provider::stats;
