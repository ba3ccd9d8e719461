//! Stencil command-line interface.
//!
//! Renders a template against a values document:
//!
//! ```text
//! stencil [TEMPLATE] [VALUES] [OUTPUT]
//! ```

pub mod cli;
pub mod error;

pub use cli::Cli;
pub use error::{CliError, Exit};
