//! The render pipeline: parse template, load values, create output, execute.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::engine::{EscapeMode, HandlebarsEngine, TemplateEngine};
use crate::error::{BoxError, RenderError, Result};
use crate::fs::{read_all, FileSystem, OsFileSystem};
use crate::values::{ValuesFormat, ValuesMap};

/// Options for the default [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fail when the template references a missing key.
    pub strict: bool,
    /// Escaping applied to substituted values.
    pub escape: EscapeMode,
    /// Force a values format instead of detecting it from the extension.
    pub values_format: Option<ValuesFormat>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strict: true,
            escape: EscapeMode::None,
            values_format: None,
        }
    }
}

/// Renders a template file against a values file into an output file.
pub struct Renderer<F = OsFileSystem, E = HandlebarsEngine> {
    fs: F,
    engine: E,
    values_format: Option<ValuesFormat>,
}

impl Renderer {
    /// Renderer over the real file system with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Renderer over the real file system with the given engine options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            fs: OsFileSystem,
            engine: HandlebarsEngine::with_options(options.strict, options.escape),
            values_format: options.values_format,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem, E: TemplateEngine> Renderer<F, E> {
    /// Renderer over caller-supplied I/O and engine.
    pub fn with_parts(fs: F, engine: E) -> Self {
        Self {
            fs,
            engine,
            values_format: None,
        }
    }

    /// Force the values format.
    pub fn values_format(mut self, format: ValuesFormat) -> Self {
        self.values_format = Some(format);
        self
    }

    /// Render `template_path` with the values in `values_path`, writing the
    /// result to `output_path`.
    ///
    /// Steps run in order and stop at the first failure. Nothing is created
    /// at `output_path` unless the template and values both loaded. After a
    /// [`RenderError::TemplateExec`] the output file may hold partial text.
    pub fn render(
        &mut self,
        template_path: impl AsRef<Path>,
        values_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<()> {
        let template_path = template_path.as_ref();
        let values_path = values_path.as_ref();
        let output_path = output_path.as_ref();

        let template = self.parse_template(template_path)?;
        let values = self.load_values(values_path)?;

        debug!(path = %output_path.display(), "creating output file");
        let mut output = self
            .fs
            .create(output_path)
            .map_err(|source| RenderError::OutputCreate {
                path: output_path.to_path_buf(),
                source,
            })?;

        self.engine
            .execute(&template, &values, &mut *output)
            .and_then(|()| output.flush().map_err(BoxError::from))
            .map_err(|source| RenderError::TemplateExec {
                path: template_path.to_path_buf(),
                source,
            })?;

        info!(
            template = %template_path.display(),
            output = %output_path.display(),
            keys = values.len(),
            "rendered template"
        );
        Ok(())
    }

    fn parse_template(&mut self, path: &Path) -> Result<E::Template> {
        debug!(path = %path.display(), "parsing template file");

        let source = self
            .fs
            .open(path)
            .and_then(read_all)
            .map_err(|e| RenderError::TemplateParse {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;

        self.engine
            .parse(&path.display().to_string(), &source)
            .map_err(|source| RenderError::TemplateParse {
                path: path.to_path_buf(),
                source,
            })
    }

    fn load_values(&self, path: &Path) -> Result<ValuesMap> {
        debug!(path = %path.display(), "loading values file");

        let reader = self.fs.open(path).map_err(|source| RenderError::ValuesOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let contents = read_all(reader).map_err(|source| RenderError::ValuesRead {
            path: path.to_path_buf(),
            source,
        })?;

        let format = self
            .values_format
            .unwrap_or_else(|| ValuesFormat::from_path(path));

        format
            .parse(&contents)
            .map_err(|source| RenderError::ValuesParse {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Render with the real file system and default options.
pub fn render(
    template_path: impl AsRef<Path>,
    values_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    Renderer::new().render(template_path, values_path, output_path)
}
