//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use stencil_render::{EscapeMode, RenderOptions, ValuesFormat};

/// Default template path, relative to the working directory.
pub const DEFAULT_TEMPLATE: &str = "template/template.yaml";
/// Default values path, relative to the working directory.
pub const DEFAULT_VALUES: &str = "template/values.yaml";
/// Default output path, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "parsed/parsed.yaml";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilConfig {
    /// Template file.
    pub template: PathBuf,
    /// Values document.
    pub values: PathBuf,
    /// Rendered output file.
    pub output: PathBuf,
    /// Fail on references to missing keys.
    pub strict: bool,
    /// Escaping applied to substituted values.
    pub escape: EscapeMode,
    /// Values format; detected from the extension when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_format: Option<ValuesFormat>,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            values: PathBuf::from(DEFAULT_VALUES),
            output: PathBuf::from(DEFAULT_OUTPUT),
            strict: true,
            escape: EscapeMode::None,
            values_format: None,
        }
    }
}

impl StencilConfig {
    /// Renderer options described by this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            strict: self.strict,
            escape: self.escape,
            values_format: self.values_format,
        }
    }
}
