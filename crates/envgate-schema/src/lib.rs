//! Type descriptors, staged coercion, and conformance checks.
//!
//! This crate is the validation capability behind `envgate`: a [`Schema`]
//! maps variable names to [`TypeDescriptor`]s, [`Schema::transform`] runs the
//! [`Stage`] pipeline over raw values, and [`Schema::check`] /
//! [`Schema::errors`] report conformance.

mod check;
mod descriptor;
mod error;
mod loader;
mod schema;
mod stage;

/// Public error type returned by schema construction and loading.
pub use error::SchemaError;
/// Violations reported by the checker.
pub use check::ValueError;
/// Descriptor types.
pub use descriptor::{DEFAULT_SEPARATOR, Format, Kind, TypeDescriptor};
pub use schema::{Schema, SchemaBuilder};
pub use stage::Stage;
