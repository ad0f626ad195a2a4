pub mod http_client;
pub mod preview;

pub use http_client::*;
pub use preview::*;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::error::AppResult;
use crate::models::FileRef;

/// The two remote collaborators of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Extraction,
    Analysis,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Extraction => f.write_str("extraction"),
            ServiceKind::Analysis => f.write_str("analysis"),
        }
    }
}

/// Turns an uploaded document into plain text.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(&self, file: &FileRef) -> AppResult<String>;
}

/// Produces a short analysis of previously extracted text.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, text: &str) -> AppResult<String>;
}
