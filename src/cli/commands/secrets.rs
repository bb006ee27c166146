//! Implementation of the `saveus-settings secrets` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::CommandContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::infrastructure::config::secrets::json_type_name;
use crate::infrastructure::config::Config;

#[derive(Args, Debug)]
pub struct SecretsArgs {
    /// Only list keys that override a static setting
    #[arg(long)]
    pub overrides_only: bool,
}

/// One injected key; the value is never included
#[derive(Debug, Clone, Serialize)]
pub struct SecretEntry {
    pub key: String,
    pub value_type: &'static str,
    pub overrides_static: bool,
}

#[derive(Debug, Serialize)]
pub struct SecretsOutput {
    pub path: PathBuf,
    pub status: String,
    pub entries: Vec<SecretEntry>,
}

impl CommandOutput for SecretsOutput {
    fn to_human(&self) -> String {
        let header = format!("{} ({})", self.path.display(), self.status);
        if self.entries.is_empty() {
            return format!("{header}\nNo keys injected.");
        }
        format!("{header}\n{}", TableFormatter::new().format_secrets(&self.entries))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: SecretsArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.load()?;
    output(&build(&args, &config), ctx.json);
    Ok(())
}

/// List injected keys in document order
pub fn build(args: &SecretsArgs, config: &Config) -> SecretsOutput {
    let entries = config
        .secrets
        .document
        .iter()
        .map(|(key, value)| SecretEntry {
            key: key.clone(),
            value_type: json_type_name(value),
            overrides_static: config.overridden.contains(key),
        })
        .filter(|entry| !args.overrides_only || entry.overrides_static)
        .collect();

    SecretsOutput {
        path: config.secrets.path.clone(),
        status: config.secrets.status.to_string(),
        entries,
    }
}
