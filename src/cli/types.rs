//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{check::CheckArgs, secrets::SecretsArgs, show::ShowArgs, CommandContext};
use crate::infrastructure::logging::{LogConfig, LogFormat, RotationPolicy};

#[derive(Parser, Debug)]
#[command(name = "saveus-settings")]
#[command(about = "Resolve and inspect saveus backend settings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Directory holding secrets.json, settings.yaml and .env
    #[arg(short, long, global = true, env = "SAVEUS_BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Do not read <base-dir>/.env
    #[arg(long, global = true)]
    pub no_dotenv: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write JSON logs to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation
    #[arg(long, global = true, value_enum, default_value_t = RotationPolicy::Daily)]
    pub log_rotation: RotationPolicy,
}

impl Cli {
    /// Logger configuration from the global flags
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            log_dir: self.log_dir.clone(),
            enable_console: true,
            rotation: self.log_rotation,
        }
    }

    /// Command context from the global flags
    pub fn context(&self) -> CommandContext {
        CommandContext {
            base_dir: self.base_dir.clone(),
            json: self.json,
            dotenv: !self.no_dotenv,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the settings namespace, secrets redacted
    Show(ShowArgs),

    /// Load and validate settings, report secrets and signing key status
    Check(CheckArgs),

    /// List keys injected from the secrets file
    Secrets(SecretsArgs),
}
