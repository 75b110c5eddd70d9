//! Error types for the regression driver
//!
//! Every fallible operation in this crate returns [`RegressResult`]. Each
//! variant carries an optional context string describing where the failure
//! happened, and exposes a stable [`RegressError::error_code`] for callers
//! that want to branch on the kind of failure.

mod constructors;
mod conversions;
mod types;

pub use types::{RegressError, RegressResult, ResultExt};
