//! Loader options and the validation-failure policy.

use crate::source::{Dotenv, Source};
use crate::{Env, EnvError, ErrorReport};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Callback invoked with the report when validation fails.
pub type ErrorCallback = Arc<dyn Fn(&ErrorReport) -> anyhow::Result<()> + Send + Sync>;
/// Callback invoked with the result when validation succeeds.
pub type SuccessCallback = Arc<dyn Fn(&Env) -> anyhow::Result<()> + Send + Sync>;

/// What to do when the environment fails validation.
#[derive(Clone, Default)]
pub enum OnError {
    /// Log the report at error level and exit the process with status 1.
    #[default]
    Exit,
    /// Log the report at warn level and continue.
    Warn,
    /// Continue without diagnostics.
    Silent,
    /// Hand the report to a callback and continue.
    Callback(ErrorCallback),
}

impl OnError {
    /// Wrap a closure as a callback policy.
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&ErrorReport) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        OnError::Callback(Arc::new(callback))
    }
}

impl fmt::Debug for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnError::Exit => f.write_str("Exit"),
            OnError::Warn => f.write_str("Warn"),
            OnError::Silent => f.write_str("Silent"),
            OnError::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Parses `exit`, `warn`, or `silent`; anything else is rejected.
impl FromStr for OnError {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exit" => Ok(OnError::Exit),
            "warn" => Ok(OnError::Warn),
            "silent" => Ok(OnError::Silent),
            other => Err(EnvError::InvalidOption(format!(
                "on_error must be one of exit, warn, silent (got {other:?})"
            ))),
        }
    }
}

/// Options controlling where values come from and how failures are handled.
#[derive(Clone, Default)]
pub struct EnvOptions {
    /// Raw source; the process environment unless overridden.
    pub source: Source,
    /// Only keys starting with this prefix are kept, with the prefix removed.
    pub prefix: Option<String>,
    /// Failure policy.
    pub on_error: OnError,
    /// Called once with the result when validation succeeds.
    pub on_success: Option<SuccessCallback>,
    /// Dotenv file merged beneath the source.
    pub dotenv: Option<Dotenv>,
    /// Expand `${NAME}` / `$NAME` references in string values.
    pub expand: bool,
}

impl EnvOptions {
    /// Defaults: process environment, no prefix, exit on failure.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn with_on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Env) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(callback));
        self
    }

    pub fn with_dotenv(mut self, dotenv: Dotenv) -> Self {
        self.dotenv = Some(dotenv);
        self
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }
}

impl fmt::Debug for EnvOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvOptions")
            .field("source", &self.source)
            .field("prefix", &self.prefix)
            .field("on_error", &self.on_error)
            .field("on_success", &self.on_success.as_ref().map(|_| ".."))
            .field("dotenv", &self.dotenv)
            .field("expand", &self.expand)
            .finish()
    }
}
