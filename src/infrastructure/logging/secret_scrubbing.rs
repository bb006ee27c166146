use regex::{Captures, Regex};
use serde_json::Value;
use std::fmt;
use std::io::{self, Write};
use std::sync::LazyLock;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::models::REDACTED;

static BEARER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.=]+").expect("valid bearer regex"));

static JWT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"eyJ[a-zA-Z0-9\-_]{5,}\.[a-zA-Z0-9\-_]{5,}\.[a-zA-Z0-9\-_]*").expect("valid jwt regex")
});

static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(["']?[a-z0-9_]*(?:secret|password|passwd|token|api_?key|signing_key)[a-z0-9_]*["']?\s*[:=]\s*)("[^"]*"|'[^']*'|[^"'\s,}]+)"#,
    )
    .expect("valid field regex")
});

static SENSITIVE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(secret|password|passwd|token|api_?key|signing_key|client_id|private|^key$)")
        .expect("valid key regex")
});

// Settings whose names look sensitive but hold durations or class paths
static NON_SECRET_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(_lifetime|_validators)$").expect("valid non-secret key regex")
});

/// Masks secret-looking text in log output and settings dumps
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    /// Create a new scrubber
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = BEARER_PATTERN.replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = JWT_PATTERN.replace_all(&scrubbed, "[TOKEN_REDACTED]");
        FIELD_PATTERN
            .replace_all(&scrubbed, |caps: &Captures| format!("{}{REDACTED}", &caps[1]))
            .into_owned()
    }

    /// Whether a settings key names a sensitive value
    pub fn is_sensitive_key(&self, key: &str) -> bool {
        SENSITIVE_KEY.is_match(key) && !NON_SECRET_KEY.is_match(key)
    }

    /// Copy of `value` with every scalar under a sensitive key replaced.
    ///
    /// `null` is kept so an unset secret still reads as unset.
    pub fn redact_value(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, inner)| {
                        let redacted = if self.is_sensitive_key(key) {
                            self.redact_all_scalars(inner)
                        } else {
                            self.redact_value(inner)
                        };
                        (key.clone(), redacted)
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.redact_value(v)).collect()),
            other => other.clone(),
        }
    }

    fn redact_all_scalars(&self, value: &Value) -> Value {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                Value::String(REDACTED.to_string())
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, inner)| (key.clone(), self.redact_all_scalars(inner)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| self.redact_all_scalars(v)).collect())
            }
            Value::Null => Value::Null,
        }
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

/// `MakeWriter` that scrubs every formatted event before writing it
#[derive(Debug, Clone)]
pub struct ScrubbingMakeWriter<M> {
    inner: M,
    scrubber: SecretScrubber,
}

impl<M> ScrubbingMakeWriter<M> {
    /// Wrap a writer factory
    pub const fn new(inner: M) -> Self {
        Self {
            inner,
            scrubber: SecretScrubber::new(),
        }
    }
}

impl<'a, M> MakeWriter<'a> for ScrubbingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = ScrubbingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        ScrubbingWriter {
            inner: self.inner.make_writer(),
            scrubber: self.scrubber,
        }
    }
}

/// Writer produced by [`ScrubbingMakeWriter`]
#[derive(Debug)]
pub struct ScrubbingWriter<W> {
    inner: W,
    scrubber: SecretScrubber,
}

impl<W: Write> Write for ScrubbingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let scrubbed = self.scrubber.scrub_message(&text);
        self.inner.write_all(scrubbed.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
