//! Constructor methods for RegressError

use super::types::RegressError;

impl RegressError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            context: None,
        }
    }

    /// Create an IO error tied to a path
    pub fn io_with_path(message: impl Into<String>, path: impl AsRef<std::path::Path>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.as_ref().display().to_string()),
            context: None,
        }
    }

    /// Create a spawn error
    pub fn spawn(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Spawn {
            program: program.into(),
            message: message.into(),
            context: None,
        }
    }

    /// Create a runner failure error
    pub fn runner_failed(command: impl Into<String>, status: i32) -> Self {
        Self::RunnerFailed {
            command: command.into(),
            status,
            context: None,
        }
    }

    /// Create a JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
            context: None,
        }
    }
}
