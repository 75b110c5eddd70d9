//! Core error type for the regression driver

use thiserror::Error;

/// Result type alias for driver operations
pub type RegressResult<T> = Result<T, RegressError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> RegressResult<T>;
}

impl<T> ResultExt<T> for RegressResult<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> RegressResult<T> {
        self.map_err(|e| e.with_context_str(context.to_string()))
    }
}

/// Main error type for the regression driver
#[derive(Error, Debug, Clone)]
pub enum RegressError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Filesystem errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// A collaborator process could not be started
    #[error("Failed to start '{program}': {message}")]
    Spawn {
        program: String,
        message: String,
        context: Option<String>,
    },

    /// The pipeline runner exited non-zero and the policy is to stop
    #[error("Runner '{command}' exited with status {status}")]
    RunnerFailed {
        command: String,
        status: i32,
        context: Option<String>,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },
}

impl RegressError {
    /// Stable identifier for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "REGRESS_CONFIG",
            Self::Io { .. } => "REGRESS_IO",
            Self::Spawn { .. } => "REGRESS_SPAWN",
            Self::RunnerFailed { .. } => "REGRESS_RUNNER_FAILED",
            Self::Json { .. } => "REGRESS_JSON",
        }
    }

    /// Context attached to the error, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Io { context, .. }
            | Self::Spawn { context, .. }
            | Self::RunnerFailed { context, .. }
            | Self::Json { context, .. } => context.as_deref(),
        }
    }

    pub(crate) fn with_context_str(mut self, value: String) -> Self {
        match &mut self {
            Self::Config { context, .. }
            | Self::Io { context, .. }
            | Self::Spawn { context, .. }
            | Self::RunnerFailed { context, .. }
            | Self::Json { context, .. } => *context = Some(value),
        }
        self
    }
}
