//! Error types for template rendering.
//!
//! This module provides [`RenderError`], the error type for every rendering
//! operation. Failures fall into two families:
//!
//! - **Parse failures** ([`RenderError::Parse`]): the template source itself is
//!   malformed or names a function the registry does not know. Nothing is
//!   executed.
//! - **Execution failures** ([`RenderError::Execution`]): the template parsed,
//!   but running it against the data went wrong (missing field, argument of the
//!   wrong type). Any text produced before the fault is discarded.
//!
//! Neither family is fatal for help output: callers are expected to fall back
//! to [`sanitize`](crate::sanitize) on any error.

use thiserror::Error;

/// Error type for template rendering operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Malformed directive syntax or an unknown function name.
    #[error("template parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A directive failed while being executed against the data.
    #[error("template execution error at line {line}: {message}")]
    Execution { line: usize, message: String },

    /// Template not registered with the engine.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The data could not be converted into a template value.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RenderError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        RenderError::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn execution(line: usize, message: impl Into<String>) -> Self {
        RenderError::Execution {
            line,
            message: message.into(),
        }
    }

    /// Returns true if the template source was rejected before execution.
    pub fn is_parse(&self) -> bool {
        matches!(self, RenderError::Parse { .. })
    }

    /// Returns true if the failure happened while executing a parsed template.
    ///
    /// Data serialization failures count as execution failures: the template
    /// was fine, the body handed to it was not.
    pub fn is_execution(&self) -> bool {
        matches!(
            self,
            RenderError::Execution { .. } | RenderError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
