//! Error types for rendering.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::values::ValuesError;

/// Boxed error produced by a template engine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias using [`RenderError`].
pub type Result<T> = std::result::Result<T, RenderError>;

/// A failed render, tagged with the step that failed.
///
/// Every variant keeps the underlying cause as its `source`, so callers can
/// walk the chain or downcast it.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template could not be read or compiled.
    #[error("parsing template file {}: {source}", path.display())]
    TemplateParse {
        /// File the step was working on.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// The values document could not be opened.
    #[error("opening values file {}: {source}", path.display())]
    ValuesOpen {
        /// File the step was working on.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The values document was opened but reading it failed.
    #[error("reading values file {}: {source}", path.display())]
    ValuesRead {
        /// File the step was working on.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The values document is not well-formed or not a mapping.
    #[error("unmarshalling values file {}: {source}", path.display())]
    ValuesParse {
        /// File the step was working on.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: ValuesError,
    },

    /// The output file could not be created.
    #[error("creating output file {}: {source}", path.display())]
    OutputCreate {
        /// File the step was working on.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// Executing the template or writing its output failed.
    #[error("executing template file {}: {source}", path.display())]
    TemplateExec {
        /// File the step was working on.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },
}

/// Fieldless classification of a [`RenderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderErrorKind {
    /// See [`RenderError::TemplateParse`].
    TemplateParse,
    /// See [`RenderError::ValuesOpen`].
    ValuesOpen,
    /// See [`RenderError::ValuesRead`].
    ValuesRead,
    /// See [`RenderError::ValuesParse`].
    ValuesParse,
    /// See [`RenderError::OutputCreate`].
    OutputCreate,
    /// See [`RenderError::TemplateExec`].
    TemplateExec,
}

impl RenderError {
    /// Which step of the render failed.
    pub fn kind(&self) -> RenderErrorKind {
        match self {
            Self::TemplateParse { .. } => RenderErrorKind::TemplateParse,
            Self::ValuesOpen { .. } => RenderErrorKind::ValuesOpen,
            Self::ValuesRead { .. } => RenderErrorKind::ValuesRead,
            Self::ValuesParse { .. } => RenderErrorKind::ValuesParse,
            Self::OutputCreate { .. } => RenderErrorKind::OutputCreate,
            Self::TemplateExec { .. } => RenderErrorKind::TemplateExec,
        }
    }

    /// The file the failing step was working on.
    ///
    /// For [`RenderError::TemplateExec`] this is the template path.
    pub fn path(&self) -> &Path {
        match self {
            Self::TemplateParse { path, .. }
            | Self::ValuesOpen { path, .. }
            | Self::ValuesRead { path, .. }
            | Self::ValuesParse { path, .. }
            | Self::OutputCreate { path, .. }
            | Self::TemplateExec { path, .. } => path,
        }
    }
}
