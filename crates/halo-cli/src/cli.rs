//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;
use halo_core::{ExtractionPolicy, ScaffoldConfig};

/// Scaffold a new project from the Halo starter kit
#[derive(Parser, Debug)]
#[command(name = "create-halo-app")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the project directory to create
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a YAML file overriding the built-in configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Template package to provision from
    #[arg(long, value_name = "PACKAGE")]
    pub template: Option<String>,

    /// Use this template version instead of the latest published one
    #[arg(long, value_name = "VERSION")]
    pub template_version: Option<String>,

    /// Package manager binary used for version lookup, pack and install
    #[arg(long, value_name = "COMMAND")]
    pub package_manager: Option<String>,

    /// Stop after the template is in place; do not install dependencies
    #[arg(long)]
    pub skip_install: bool,

    /// Treat archive extraction errors as fatal
    #[arg(long)]
    pub strict_extract: bool,

    /// Do not draw the install spinner
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Apply flag overrides on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut ScaffoldConfig) {
        if let Some(template) = &self.template {
            config.template.package = template.clone();
        }
        if let Some(command) = &self.package_manager {
            config.package_manager.command = command.clone();
        }
        if self.strict_extract {
            config.extraction.policy = ExtractionPolicy::Fail;
        }
        if self.no_progress || self.quiet {
            config.progress.enabled = false;
        }
    }
}
