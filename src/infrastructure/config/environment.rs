//! Environment snapshot used by the config loader.
//!
//! Loading reads variables from a snapshot rather than the live process
//! environment, so the same snapshot always resolves to the same settings.

use std::collections::BTreeMap;
use std::path::Path;

/// Default dotenv file name, relative to the base directory
pub const DOTENV_FILE_NAME: &str = ".env";

/// Immutable set of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Snapshot from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Overlay variables from a dotenv file.
    ///
    /// Variables already in the snapshot win. A missing file is skipped;
    /// an unreadable or malformed file is logged and skipped.
    #[must_use]
    pub fn with_dotenv(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(err) if err.not_found() => {
                tracing::debug!(path = %path.display(), "no dotenv file");
                return self;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read dotenv file");
                return self;
            }
        };

        let mut added = 0usize;
        for item in iter {
            match item {
                Ok((key, value)) => {
                    if !self.vars.contains_key(&key) {
                        self.vars.insert(key, value);
                        added += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "stopped reading malformed dotenv file"
                    );
                    break;
                }
            }
        }

        tracing::debug!(path = %path.display(), added, "dotenv file applied");
        self
    }

    /// Value of a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Value of a variable, `None` when absent or blank
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    /// Variables starting with `prefix`, with the prefix stripped.
    pub fn prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.vars.iter().filter_map(move |(key, value)| {
            key.strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (rest, value.as_str()))
        })
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
