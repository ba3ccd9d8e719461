//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use stencil_common_config::{ConfigLoader, StencilConfig};
use stencil_common_log::{LogConfig, LogLevel};
use stencil_render::Renderer;
use tracing::debug;

use crate::error::CliError;

/// Stencil - render a template file with values from a YAML document
///
/// Paths not given on the command line come from `.stencil/config.yaml`
/// (or the file passed with `--config`), then from the built-in defaults.
#[derive(Debug, Parser)]
#[command(
    name = "stencil",
    author,
    version,
    about,
    long_about = None,
    help_template = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
    /// Template file to render
    #[arg(value_hint = ValueHint::FilePath, help = "Template file [default: template/template.yaml]")]
    pub template: Option<PathBuf>,

    /// Values document supplying the template data
    #[arg(value_hint = ValueHint::FilePath, help = "Values file [default: template/values.yaml]")]
    pub values: Option<PathBuf>,

    /// File the rendered output is written to
    #[arg(value_hint = ValueHint::FilePath, help = "Output file [default: parsed/parsed.yaml]")]
    pub output: Option<PathBuf>,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        help = "Only log errors"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "STENCIL_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Logging configuration: environment first, then `-v`/`-q`.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::from_env_with_level(LogLevel::Warn);
        if let Some(level) = LogLevel::from_verbosity(self.verbose, self.quiet) {
            config.level = level;
        }
        config
    }

    /// Resolve the effective configuration. Positional paths override the file.
    pub fn load_config(&self) -> Result<StencilConfig, CliError> {
        let loader = ConfigLoader::default();
        let mut config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };

        if let Some(template) = &self.template {
            config.template = template.clone();
        }
        if let Some(values) = &self.values {
            config.values = values.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }

        loader.validate(&config)?;
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Render once and report the generated file on stdout.
    pub fn execute(&self, config: &StencilConfig) -> Result<(), CliError> {
        Renderer::with_options(config.render_options()).render(
            &config.template,
            &config.values,
            &config.output,
        )?;

        println!("file {} was generated.", config.output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_paths() {
        let cli = Cli::parse_from(["stencil", "a.hbs", "b.yaml", "out/c.yaml"]);
        assert_eq!(cli.template, Some(PathBuf::from("a.hbs")));
        assert_eq!(cli.values, Some(PathBuf::from("b.yaml")));
        assert_eq!(cli.output, Some(PathBuf::from("out/c.yaml")));
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::parse_from(["stencil"]);
        assert!(cli.template.is_none());
        assert!(cli.values.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::parse_from(["stencil", "-vvv"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["stencil", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_too_many_positionals() {
        assert!(Cli::try_parse_from(["stencil", "a", "b", "c", "d"]).is_err());
    }
}
