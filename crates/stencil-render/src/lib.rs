//! Stencil render core.
//!
//! Renders a template file against a YAML (or JSON) values document and
//! writes the result to an output file:
//!
//! ```no_run
//! stencil_render::render(
//!     "template/template.yaml",
//!     "template/values.yaml",
//!     "parsed/parsed.yaml",
//! )?;
//! # Ok::<(), stencil_render::RenderError>(())
//! ```
//!
//! File access and template execution sit behind the [`FileSystem`] and
//! [`TemplateEngine`] traits so either can be replaced.

pub mod engine;
pub mod error;
pub mod fs;
pub mod renderer;
pub mod values;

pub use engine::{CompiledTemplate, EscapeMode, HandlebarsEngine, TemplateEngine};
pub use error::{BoxError, RenderError, RenderErrorKind, Result};
pub use fs::{FileSystem, OsFileSystem};
pub use renderer::{render, RenderOptions, Renderer};
pub use values::{Value, ValuesError, ValuesFormat, ValuesMap};
