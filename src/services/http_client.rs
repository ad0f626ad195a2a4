use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::send_logged;
use crate::models::{AnalyzeReply, AnalyzeRequest, ExtractReply, FileRef};
use crate::services::{AnalysisService, ExtractionService, ServiceKind};

/// HTTP client for the extraction and analysis services.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    extract_url: Url,
    analyze_url: Url,
}

impl ServiceClient {
    pub fn new(extract_url: Url, analyze_url: Url, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            extract_url,
            analyze_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.extract_url.clone(),
            config.analyze_url.clone(),
            config.request_timeout(),
        )
    }
}

#[async_trait]
impl ExtractionService for ServiceClient {
    async fn extract(&self, file: &FileRef) -> AppResult<String> {
        let service = ServiceKind::Extraction;

        let part = Part::stream_with_length(file.content().clone(), file.size() as u64)
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| AppError::transport(service, e.to_string()))?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            file_name = %file.name(),
            mime_type = %file.mime_type(),
            file_size = file.size(),
            "Uploading file for extraction"
        );

        let response = send_logged(
            service,
            self.http.post(self.extract_url.clone()).multipart(form),
        )
        .await
        .map_err(|e| AppError::transport(service, e.to_string()))?;

        let reply: ExtractReply = read_reply(service, response).await?;
        reply.into_result()
    }
}

#[async_trait]
impl AnalysisService for ServiceClient {
    async fn analyze(&self, text: &str) -> AppResult<String> {
        let service = ServiceKind::Analysis;

        // `.json()` sets `Content-Type: application/json`.
        let response = send_logged(
            service,
            self.http
                .post(self.analyze_url.clone())
                .json(&AnalyzeRequest { text }),
        )
        .await
        .map_err(|e| AppError::transport(service, e.to_string()))?;

        let reply: AnalyzeReply = read_reply(service, response).await?;
        reply.into_result()
    }
}

// Non-2xx statuses and undecodable bodies are both transport failures.
async fn read_reply<T: DeserializeOwned>(service: ServiceKind, response: Response) -> AppResult<T> {
    let response = response
        .error_for_status()
        .map_err(|e| AppError::transport(service, e.to_string()))?;

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::transport(service, format!("malformed response: {}", e)))
}
