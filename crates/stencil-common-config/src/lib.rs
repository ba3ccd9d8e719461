//! Configuration types for Stencil.
//!
//! This crate provides the configuration used by the `stencil` binary,
//! read from `.stencil/config.yaml` or an explicit file.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
