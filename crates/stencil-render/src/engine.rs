//! Template engines.
//!
//! Uses Handlebars templates: `{{name}}`, `{{#if flag}}`,
//! `{{#each items}}{{this}}{{/each}}` and dotted paths such as
//! `{{owner.team}}`.

use std::io::Write;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::values::ValuesMap;

/// Compiles template source and executes it against a [`ValuesMap`].
pub trait TemplateEngine {
    /// A compiled template.
    type Template;

    /// Compile `source`. `name` identifies the template in error messages.
    fn parse(&mut self, name: &str, source: &str) -> Result<Self::Template, BoxError>;

    /// Execute a compiled template, streaming its output into `out`.
    fn execute(
        &self,
        template: &Self::Template,
        values: &ValuesMap,
        out: &mut dyn Write,
    ) -> Result<(), BoxError>;
}

/// How substituted values are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Emit values verbatim.
    #[default]
    None,
    /// Escape HTML special characters.
    Html,
}

/// Handlebars-backed engine.
pub struct HandlebarsEngine {
    handlebars: Handlebars<'static>,
}

/// Handle to a template registered with a [`HandlebarsEngine`].
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    name: String,
}

impl CompiledTemplate {
    /// Name the template was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl HandlebarsEngine {
    /// Strict engine without escaping.
    pub fn new() -> Self {
        Self::with_options(true, EscapeMode::None)
    }

    /// In strict mode a reference to a missing key is an execution error;
    /// otherwise it renders as empty text.
    pub fn with_options(strict: bool, escape: EscapeMode) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(strict);
        match escape {
            EscapeMode::None => handlebars.register_escape_fn(handlebars::no_escape),
            EscapeMode::Html => handlebars.register_escape_fn(handlebars::html_escape),
        }

        Self { handlebars }
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    type Template = CompiledTemplate;

    fn parse(&mut self, name: &str, source: &str) -> Result<Self::Template, BoxError> {
        self.handlebars.register_template_string(name, source)?;
        Ok(CompiledTemplate {
            name: name.to_string(),
        })
    }

    fn execute(
        &self,
        template: &Self::Template,
        values: &ValuesMap,
        out: &mut dyn Write,
    ) -> Result<(), BoxError> {
        self.handlebars.render_to_write(&template.name, values, out)?;
        Ok(())
    }
}
