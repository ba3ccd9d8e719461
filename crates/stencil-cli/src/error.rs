//! CLI error handling.

use std::process::ExitCode;

use stencil_common_config::ConfigError;
use stencil_common_log::LogError;
use stencil_render::RenderError;
use thiserror::Error;

/// Application exit codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    Failure = 1,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// Anything that stops the `stencil` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Log(#[from] LogError),
}

impl CliError {
    /// Every failure exits with status 1.
    pub fn exit(&self) -> Exit {
        Exit::Failure
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }
}
