//! Schema-validated environment variables for Rocket applications.
//!
//! [`load`] reads the process environment (or an injected [`Source`]),
//! optionally keeps only keys with a prefix, coerces values through the
//! schema's stage pipeline, and checks them. [`env_fairing`] runs the same
//! load at construction time and attaches the resulting [`Env`] to Rocket's
//! managed state.

mod env;
mod error;
mod fairing;
mod loader;
mod options;
mod report;
mod source;

/// Re-export for convenience.
pub use envgate_schema as schema;

pub use env::Env;
pub use error::EnvError;
pub use fairing::{ENV_DECORATOR, EnvPlugin, env_fairing, env_fairing as env_plugin};
pub use loader::{EXIT_STATUS, load};
pub use options::{EnvOptions, ErrorCallback, OnError, SuccessCallback};
pub use report::{ErrorReport, ROOT_PATH};
pub use source::{DEFAULT_DOTENV_FILE, Dotenv, Source};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// `RUST_LOG` overrides the default `warn` filter. This is a no-op if the
/// feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let env = env_logger::Env::default().default_filter_or("warn");
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}
