//! Error types.

pub use crate::build::{BuildError, BuildErrorKind};
pub use fluent_uri::error::ParseError;
