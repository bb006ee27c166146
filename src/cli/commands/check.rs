//! Implementation of the `saveus-settings check` command.

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::CommandContext;
use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::ConfigError;
use crate::infrastructure::config::Config;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Fail when the signing key is missing or secrets were not loaded
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub base_dir: PathBuf,
    pub secrets_file: PathBuf,
    pub secrets_status: String,
    pub secrets_loaded: bool,
    pub injected_keys: usize,
    pub overridden: Vec<String>,
    pub signing_key_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mark = |ok: bool| {
            if ok {
                style("✓").green().to_string()
            } else {
                style("✗").red().to_string()
            }
        };

        let mut lines = vec![
            format!("{} settings valid ({})", mark(true), self.base_dir.display()),
            format!(
                "{} secrets file {}: {}",
                mark(self.secrets_loaded),
                self.secrets_file.display(),
                self.secrets_status
            ),
            format!(
                "{} SECRET_KEY {}",
                mark(self.signing_key_present),
                if self.signing_key_present { "set" } else { "not set" }
            ),
        ];
        if !self.overridden.is_empty() {
            lines.push(format!("  secrets override: {}", self.overridden.join(", ")));
        }
        if let Some(ref error) = self.error {
            lines.push(format!("{} strict check failed: {error}", mark(false)));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: CheckArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.load()?;
    let failure = if args.strict {
        enforce_strict(&config).err()
    } else {
        None
    };

    let output_data = build(&config, &ctx.base_dir, failure.as_ref());
    output(&output_data, ctx.json);

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Summarize a loaded configuration, marking it failed when `failure` is set
pub fn build(config: &Config, base_dir: &Path, failure: Option<&ConfigError>) -> CheckOutput {
    CheckOutput {
        success: failure.is_none(),
        base_dir: base_dir.to_path_buf(),
        secrets_file: config.secrets.path.clone(),
        secrets_status: config.secrets.status.to_string(),
        secrets_loaded: config.secrets.status.is_loaded(),
        injected_keys: config.secrets.document.len(),
        overridden: config.overridden.clone(),
        signing_key_present: config.settings.signing_key().is_some(),
        error: failure.map(ToString::to_string),
    }
}

/// Requirements of `check --strict`
pub fn enforce_strict(config: &Config) -> Result<(), ConfigError> {
    config.settings.require_signing_key()?;
    if !config.secrets.status.is_loaded() {
        return Err(ConfigError::ValidationFailed(format!(
            "secrets file {} was not loaded ({})",
            config.secrets.path.display(),
            config.secrets.status
        )));
    }
    Ok(())
}
