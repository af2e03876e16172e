//! Error types for finweb-core
//!
//! Every way a dependent select load can end short of displaying options,
//! with codes, severities and suggestions for logging.

use crate::types::Severity;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No parent selected
    EmptyParent,
    /// Request could not be completed
    NetworkFailure,
    /// Non-2xx status
    ServerError,
    /// Body is not the expected JSON array
    MalformedResponse,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::EmptyParent => write!(f, "EMPTY_PARENT"),
            ErrorCode::NetworkFailure => write!(f, "NETWORK_FAILURE"),
            ErrorCode::ServerError => write!(f, "SERVER_ERROR"),
            ErrorCode::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
        }
    }
}

/// Detailed error information for logs
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Outcome of a load that did not produce options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("No parent selected")]
    EmptyParent,

    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    #[error("Server returned HTTP {status}")]
    ServerError { status: u16 },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

impl LoadError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            LoadError::EmptyParent => ErrorCode::EmptyParent,
            LoadError::NetworkFailure { .. } => ErrorCode::NetworkFailure,
            LoadError::ServerError { .. } => ErrorCode::ServerError,
            LoadError::MalformedResponse { .. } => ErrorCode::MalformedResponse,
        }
    }

    /// Severity used when the error is surfaced to the user
    pub fn severity(&self) -> Severity {
        match self {
            LoadError::EmptyParent => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Whether the notification collaborator must hear about it
    pub fn notifies(&self) -> bool {
        !matches!(self, LoadError::EmptyParent)
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            LoadError::EmptyParent => details,
            LoadError::NetworkFailure { .. } => details
                .with_suggestion("Check that the finance app is running and reachable.".to_string())
                .with_suggestion("Re-select the category to retry.".to_string()),
            LoadError::ServerError { status } if *status == 404 => details
                .with_suggestion("Check api.subcategories_path in the configuration.".to_string()),
            LoadError::ServerError { .. } => details
                .with_suggestion("Inspect the server log for the failing request.".to_string()),
            LoadError::MalformedResponse { .. } => details.with_suggestion(
                "The endpoint must return a JSON array of {id, nome} objects.".to_string(),
            ),
        }
    }
}

/// Result type with LoadError
pub type LoadResult<T> = Result<T, LoadError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Request tag, derived from the control's sequence number
    pub request_id: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: String) -> Self {
        Self {
            request_id: None,
            operation,
            data: serde_json::json!({}),
        }
    }

    /// Add request ID
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &LoadError, context: &ErrorContext);
    /// Log debug information
    fn log_debug(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &LoadError, context: &ErrorContext) {
        log::error!(
            target: "finweb::error",
            "ERROR [{}] {} - Operation: {} - Request: {:?} - Data: {}",
            error.code(),
            error.to_details(),
            context.operation,
            context.request_id,
            context.data
        );
    }

    fn log_debug(&self, message: &str, context: &ErrorContext) {
        log::debug!(
            target: "finweb::error",
            "DEBUG: {} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_id
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::EmptyParent.to_string(), "EMPTY_PARENT");
        assert_eq!(ErrorCode::ServerError.to_string(), "SERVER_ERROR");
        assert_eq!(ErrorCode::MalformedResponse.to_string(), "MALFORMED_RESPONSE");
    }

    #[test]
    fn test_load_error_code() {
        assert_eq!(LoadError::ServerError { status: 500 }.code(), ErrorCode::ServerError);
        let error = LoadError::NetworkFailure { message: "refused".to_string() };
        assert_eq!(error.code(), ErrorCode::NetworkFailure);
    }

    #[test]
    fn test_empty_parent_is_not_notified() {
        assert!(!LoadError::EmptyParent.notifies());
        assert_eq!(LoadError::EmptyParent.severity(), Severity::Info);
    }

    #[test]
    fn test_failures_notify_as_error() {
        let errors = [
            LoadError::NetworkFailure { message: "dns".to_string() },
            LoadError::ServerError { status: 500 },
            LoadError::MalformedResponse { message: "expected array".to_string() },
        ];
        for error in errors {
            assert!(error.notifies());
            assert_eq!(error.severity(), Severity::Error);
        }
    }

    #[test]
    fn test_error_details() {
        let details = LoadError::ServerError { status: 404 }.to_details();
        assert_eq!(details.code, ErrorCode::ServerError);
        assert!(details.message.contains("404"));
        assert_eq!(details.suggestions.len(), 1);
        assert!(details.to_string().starts_with("[SERVER_ERROR]"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("load_subcategories".to_string())
            .with_request_id("seq-3".to_string())
            .with_data("parent_id", serde_json::json!("7"));

        assert_eq!(context.operation, "load_subcategories");
        assert_eq!(context.request_id, Some("seq-3".to_string()));
        assert_eq!(context.data["parent_id"], "7");
    }
}
