//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod palette;
mod status;

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::build::BuildContext;
use crate::config::loader::{find_config, merge_cli_overrides, resolve_path, CliOverrides};
use crate::config::{default_config, load_config, BootscoreConfig};
use crate::environment::{EnvironmentType, ENVIRONMENT_VAR};
use crate::settings::{JsonSettingsStore, SettingsError};
use crate::theme::ThemeLayout;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// bsbuild - SCSS build cache and palette export for Bootscore themes
#[derive(Parser)]
#[command(name = "bsbuild")]
#[command(about = "Compile Bootscore theme SCSS when sources change and export theme.json palettes")]
#[command(version)]
pub struct Cli {
    /// Path to bootscore.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Environment type: local, development, staging, production
    #[arg(long = "env", global = true, env = ENVIRONMENT_VAR)]
    pub environment: Option<String>,

    /// Override template (parent) theme directory
    #[arg(long, global = true)]
    pub template: Option<PathBuf>,

    /// Override stylesheet (child) theme directory
    #[arg(long, global = true)]
    pub stylesheet: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile scss/main.scss into css/main.css when sources changed
    Build {
        /// Rebuild even if the stylesheet is up to date
        #[arg(short, long)]
        force: bool,

        /// Watch for changes and rebuild automatically
        #[arg(short, long)]
        watch: bool,

        /// Export theme.json after a successful build
        #[arg(long)]
        palette: bool,
    },

    /// Write theme.json from the compiled stylesheet
    Palette,

    /// Show whether the stylesheet would be rebuilt, without writing anything
    Status,
}

/// Configuration and environment shared by every command.
pub(crate) struct Session {
    pub config: BootscoreConfig,
    pub project_root: PathBuf,
    pub environment: EnvironmentType,
    pub config_path: Option<PathBuf>,
}

impl Session {
    /// Load bootscore.toml (or defaults) and apply CLI overrides.
    ///
    /// Prints the error and returns the exit code on failure.
    fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self, ExitCode> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        if let Some(path) = config_path {
            if !path.is_file() {
                eprintln!("Error: Config file not found: {}", path.display());
                return Err(ExitCode::from(EXIT_INVALID_ARGS));
            }
        }

        let config_path = config_path.map(|p| p.to_path_buf()).or_else(find_config);
        let mut config = match &config_path {
            Some(path) => match load_config(Some(path)) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error loading config: {}", e);
                    return Err(ExitCode::from(EXIT_ERROR));
                }
            },
            None => default_config(),
        };

        let project_root = config_path
            .as_deref()
            .and_then(crate::config::loader::project_root)
            .map(|p| resolve_path(&cwd, p))
            .unwrap_or_else(|| cwd.clone());

        // Directories given on the command line are relative to the working
        // directory, not the project root.
        let overrides = CliOverrides {
            template: overrides.template.as_deref().map(|p| resolve_path(&cwd, p)),
            stylesheet: overrides.stylesheet.as_deref().map(|p| resolve_path(&cwd, p)),
            environment: overrides.environment.clone(),
        };
        for dir in overrides.template.iter().chain(overrides.stylesheet.iter()) {
            if !dir.is_dir() {
                eprintln!("Error: Theme directory not found: {}", dir.display());
                return Err(ExitCode::from(EXIT_INVALID_ARGS));
            }
        }
        merge_cli_overrides(&mut config, &overrides);

        let environment = EnvironmentType::resolve([config.site.environment.as_deref()]);

        Ok(Self { config, project_root, environment, config_path })
    }

    pub fn context(&self) -> BuildContext {
        BuildContext::from_config(&self.config, &self.project_root, self.environment)
    }

    pub fn settings_path(&self) -> PathBuf {
        resolve_path(&self.project_root, &self.config.settings.path)
    }

    /// Open the settings store scoped to the active theme.
    pub fn open_store(&self, layout: &ThemeLayout) -> Result<JsonSettingsStore, SettingsError> {
        JsonSettingsStore::open(self.settings_path(), layout.settings_scope())
    }
}

/// Main CLI entry point
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        template: cli.template.clone(),
        stylesheet: cli.stylesheet.clone(),
        environment: cli.environment.clone(),
    };

    let session = match Session::load(cli.config.as_deref(), &overrides) {
        Ok(session) => session,
        Err(code) => return code,
    };

    if let Err(e) = crate::logging::init(&session.config.logging, cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match cli.command {
        Commands::Build { force, watch, palette } => {
            build::run_build(&session, force, watch, palette)
        }
        Commands::Palette => palette::run_palette(&session),
        Commands::Status => status::run_status(&session),
    }
}
