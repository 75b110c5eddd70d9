//! From trait implementations for RegressError conversions

use super::types::RegressError;

impl From<serde_json::Error> for RegressError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}
