use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive string value (signing keys, passwords).
///
/// `Debug` and `Display` never print the inner value. Serialization is
/// transparent because settings layers pass values through serde; use
/// [`SecretScrubber`](crate::infrastructure::logging::SecretScrubber)
/// before showing serialized settings to an operator.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Secret {
    inner: String,
}

impl Secret {
    /// Wrap a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Expose the secret value for use.
    ///
    /// Only call this where the value is actually consumed.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Whether the wrapped value is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

// A JSON document may carry an all-digit password as an integer. Integers
// convert without loss; floats and booleans are rejected.
impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Self::new(text),
            Repr::Unsigned(n) => Self::new(n.to_string()),
            Repr::Signed(n) => Self::new(n.to_string()),
        })
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
