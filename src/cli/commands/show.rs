//! Implementation of the `saveus-settings show` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use super::CommandContext;
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::Config;
use crate::infrastructure::logging::SecretScrubber;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print only this setting
    pub key: Option<String>,

    /// Show the typed settings after environment overrides instead of the namespace
    #[arg(long)]
    pub resolved: bool,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub key: Option<String>,
    pub value: Value,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let rendered = serde_json::to_string_pretty(&self.value).unwrap_or_default();
        match self.key {
            Some(ref key) => format!("{key} = {rendered}"),
            None => rendered,
        }
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: ShowArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.load()?;
    let output_data = build(&args, &config)?;
    output(&output_data, ctx.json);
    Ok(())
}

/// Build the (redacted) output for a loaded configuration
pub fn build(args: &ShowArgs, config: &Config) -> Result<ShowOutput> {
    let redacted = if args.resolved {
        let settings =
            serde_json::to_value(&config.settings).context("Failed to serialize settings")?;
        SecretScrubber::new().redact_value(&settings)
    } else {
        config.namespace.redacted()
    };

    let value = match args.key {
        Some(ref key) => redacted
            .get(key)
            .cloned()
            .with_context(|| format!("Unknown setting: {key}"))?,
        None => redacted,
    };

    Ok(ShowOutput {
        key: args.key.clone(),
        value,
    })
}
