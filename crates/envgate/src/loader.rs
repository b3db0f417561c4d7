//! Load, validate, and dispatch on the result.

use crate::source::{expand_references, filter_prefix, merge_dotenv};
use crate::{Env, EnvError, EnvOptions, ErrorReport, OnError};
use envgate_schema::{Schema, Stage};
use log::{Level, debug, error, info, log_enabled, warn};

/// Process exit status used by [`OnError::Exit`].
pub const EXIT_STATUS: i32 = 1;

/// Read the configured source, validate it against `schema`, and return the
/// coerced values.
///
/// On failure the [`OnError`] policy decides what happens. `Exit` never
/// returns. `Exit` and `Warn` write the report to stderr directly when no
/// logger accepts the record. Every other policy returns the best-effort coerced values with
/// [`Env::is_valid`] false, and `on_success` is not called.
///
/// `Err` is reserved for dotenv read failures and callbacks that return an
/// error.
pub fn load(schema: &Schema, options: &EnvOptions) -> Result<Env, EnvError> {
    let mut raw = options.source.read();
    if let Some(dotenv) = &options.dotenv {
        merge_dotenv(&mut raw, dotenv)?;
    }
    if options.expand {
        expand_references(&mut raw);
    }
    let filtered = filter_prefix(raw, options.prefix.as_deref());
    debug!(
        "validating environment (keys={}, fields={}, prefix={:?})",
        filtered.len(),
        schema.len(),
        options.prefix
    );

    let candidate = schema.transform(&Stage::PIPELINE, filtered);
    if schema.check(&candidate) {
        let env = Env::new(candidate, true);
        if let Some(on_success) = &options.on_success {
            on_success(&env).map_err(EnvError::Callback)?;
        }
        info!("environment validated (fields={})", env.len());
        return Ok(env);
    }

    let report = ErrorReport::from_errors(&schema.errors(&candidate));
    match &options.on_error {
        OnError::Callback(on_error) => on_error(&report).map_err(EnvError::Callback)?,
        OnError::Exit => {
            if log_enabled!(Level::Error) {
                error!("{report}");
                log::logger().flush();
            } else {
                eprintln!("{report}");
            }
            std::process::exit(EXIT_STATUS);
        }
        OnError::Warn => {
            if log_enabled!(Level::Warn) {
                warn!("{report}");
            } else {
                eprintln!("{report}");
            }
        }
        OnError::Silent => {}
    }
    Ok(Env::new(candidate, false))
}
