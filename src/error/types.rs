use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::services::ServiceKind;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("No file selected")]
    NoFileSelected,

    /// `NoFileSelected` as raised by an analyze request rather than intake.
    #[error("No file to analyze")]
    NoFileToAnalyze,

    #[error("Unsupported file type: {mime_type}")]
    UnsupportedType { mime_type: String },

    #[error("{service} service returned an error: {message}")]
    ServiceError { service: ServiceKind, message: String },

    #[error("{service} service request failed: {message}")]
    TransportError { service: ServiceKind, message: String },

    #[error("A pipeline run is already in flight")]
    PipelineBusy,

    #[error("Command queue is full")]
    QueueFull,

    #[error("Controller session has stopped")]
    SessionClosed,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NoFileSelected => "NO_FILE_SELECTED",
            AppError::NoFileToAnalyze => "NO_FILE_TO_ANALYZE",
            AppError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            AppError::ServiceError { .. } => "SERVICE_ERROR",
            AppError::TransportError { .. } => "TRANSPORT_ERROR",
            AppError::PipelineBusy => "PIPELINE_BUSY",
            AppError::QueueFull => "QUEUE_FULL",
            AppError::SessionClosed => "SESSION_CLOSED",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Text shown to the user when this error is surfaced.
    ///
    /// Service errors pass through verbatim. Transport failures map to one
    /// generic message; the detail only reaches the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NoFileSelected => "No file selected.".to_string(),
            AppError::NoFileToAnalyze => "Please upload a file first.".to_string(),
            AppError::UnsupportedType { .. } => "Only PDF or Images allowed.".to_string(),
            AppError::ServiceError { message, .. } => message.clone(),
            AppError::TransportError { .. } => "Something went wrong.".to_string(),
            AppError::PipelineBusy => "Analysis already in progress.".to_string(),
            AppError::QueueFull => "UI command queue is full; please retry".to_string(),
            AppError::SessionClosed => {
                "Analyzer session stopped; restart the application".to_string()
            }
            AppError::ConfigError { .. } | AppError::Internal { .. } => self.to_string(),
        }
    }

    /// Rejected before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::NoFileSelected
                | AppError::NoFileToAnalyze
                | AppError::UnsupportedType { .. }
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal {
            message: format!("JSON encoding error: {}", err),
        }
    }
}

// Helper methods for creating specific errors
impl AppError {
    pub fn unsupported(mime_type: impl Into<String>) -> Self {
        AppError::UnsupportedType {
            mime_type: mime_type.into(),
        }
    }

    pub fn service(service: ServiceKind, message: impl Into<String>) -> Self {
        AppError::ServiceError {
            service,
            message: message.into(),
        }
    }

    pub fn transport(service: ServiceKind, message: impl Into<String>) -> Self {
        AppError::TransportError {
            service,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}

/// An error surfaced to the user, stamped with the moment it was raised.
#[derive(Debug, Clone)]
pub struct Alert {
    pub error: AppError,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(error: AppError) -> Self {
        Self {
            error,
            raised_at: Utc::now(),
        }
    }

    pub fn message(&self) -> String {
        self.error.user_message()
    }
}
