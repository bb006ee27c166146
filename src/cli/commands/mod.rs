//! CLI command implementations.

use anyhow::Result;
use std::path::PathBuf;

use crate::infrastructure::config::{Config, ConfigLoader, Environment, DOTENV_FILE_NAME};

pub mod check;
pub mod secrets;
pub mod show;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Base directory of the backend
    pub base_dir: PathBuf,
    /// Emit JSON output
    pub json: bool,
    /// Overlay `<base_dir>/.env` on the process environment
    pub dotenv: bool,
}

impl CommandContext {
    /// Environment snapshot for this invocation
    pub fn environment(&self) -> Environment {
        let env = Environment::from_process();
        if self.dotenv {
            env.with_dotenv(self.base_dir.join(DOTENV_FILE_NAME))
        } else {
            env
        }
    }

    /// Resolve configuration for this invocation
    pub fn load(&self) -> Result<Config> {
        ConfigLoader::new(&self.base_dir).load(&self.environment())
    }
}
