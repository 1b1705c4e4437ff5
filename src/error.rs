use std::time::Duration;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Parameter or field that caused the error (e.g., "url", "speed")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "jsonp", "speech", "translate")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the API-call layer.
///
/// Every variant bubbles to the immediate caller unchanged; nothing in this
/// crate retries or reinterprets an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {message}{}", format_context(.context))]
    InvalidArgument {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// A JSONP callback was never invoked within the configured wait.
    #[error("JSONP callback {callback} was not invoked within {waited:?}")]
    NonDelivery { callback: String, waited: Duration },

    #[error("No route matches path '{path}'")]
    RouteNotFound { path: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::invalid_argument_with_context(msg, ErrorContext::new())
    }

    /// Create a new invalid-argument error with structured context
    pub fn invalid_argument_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidArgument {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidArgument { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// HTTP status code when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(crate::transport::TransportError::Status { status, .. }) => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Transport(crate::transport::TransportError::Timeout(_))
                | Error::NonDelivery { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display_includes_context() {
        let err = Error::invalid_argument_with_context(
            "url is necessary",
            ErrorContext::new().with_field_path("url").with_source("jsonp"),
        );
        assert_eq!(
            err.to_string(),
            "Invalid argument: url is necessary (field: url, source: jsonp)"
        );
        assert_eq!(err.context().and_then(|c| c.source.as_deref()), Some("jsonp"));
    }

    #[test]
    fn status_is_exposed_for_non_success_responses() {
        let err = Error::from(crate::transport::TransportError::Status {
            status: 401,
            body: "unauthorized".into(),
        });
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_timeout());
    }
}
