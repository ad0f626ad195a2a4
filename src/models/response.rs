use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::ServiceKind;

/// Body returned by `POST /extract`: `{ "text" }` or `{ "error" }`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExtractReply {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body returned by `POST /analyze`: `{ "analysis" }` or `{ "error" }`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalyzeReply {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExtractReply {
    pub fn into_result(self) -> AppResult<String> {
        settle(ServiceKind::Extraction, self.text, self.error, "text")
    }
}

impl AnalyzeReply {
    pub fn into_result(self) -> AppResult<String> {
        settle(ServiceKind::Analysis, self.analysis, self.error, "analysis")
    }
}

// A non-empty `error` wins over any payload sent alongside it.
fn settle(
    service: ServiceKind,
    value: Option<String>,
    error: Option<String>,
    field: &str,
) -> AppResult<String> {
    match (value, error) {
        (_, Some(message)) if !message.is_empty() => Err(AppError::service(service, message)),
        (Some(value), _) => Ok(value),
        (None, _) => Err(AppError::transport(
            service,
            format!("response carried neither `{}` nor `error`", field),
        )),
    }
}
