//! HTTP client for the analysis service.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use shared::{
    domain::{DocumentType, ExportFormat},
    error::ErrorBody,
    protocol::{AnalyzeRequest, CoverageAnalysis, ExportRequest, GenerateRequest, HealthResponse},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{}", describe_transport_failure(.0))]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("invalid response from analysis service: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("the analysis service has no {action} endpoint for {document_type} documents")]
    UnsupportedRoute {
        action: &'static str,
        document_type: DocumentType,
    },
    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Backend { status, .. } => Some(*status),
            ServiceError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceError::Transport(_))
    }
}

pub fn describe_transport_failure(err: &reqwest::Error) -> String {
    if err.is_connect() {
        "analysis service unreachable; check the service URL and retry".to_string()
    } else if err.is_timeout() {
        "analysis service timed out; retry the request".to_string()
    } else if err.is_decode() || err.is_body() {
        format!("analysis service sent an unreadable response: {err}")
    } else {
        format!("transport error: {err}")
    }
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(
        &self,
        document_type: DocumentType,
        requirement: &str,
    ) -> Result<CoverageAnalysis, ServiceError>;
    async fn generate(
        &self,
        document_type: DocumentType,
        request: &GenerateRequest<'_>,
    ) -> Result<Value, ServiceError>;
    async fn export(
        &self,
        format: ExportFormat,
        request: &ExportRequest<'_>,
    ) -> Result<Vec<u8>, ServiceError>;
    async fn health(&self) -> Result<HealthResponse, ServiceError>;
}

pub struct HttpAnalysisClient {
    http: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ServiceError> {
        let parsed = Url::parse(base_url.trim())?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> Result<Response, ServiceError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(%url, "posting to analysis service");
        let response = self.http.post(&url).json(body).send().await?;
        ensure_success(path, response).await
    }
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let bytes = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .and_then(|body| body.message().map(str::to_string))
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    warn!(endpoint = path, status = status.as_u16(), %message, "analysis service rejected request");

    Err(ServiceError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(
        &self,
        document_type: DocumentType,
        requirement: &str,
    ) -> Result<CoverageAnalysis, ServiceError> {
        let bytes = self
            .post_json(
                &document_type.analyze_path(),
                &AnalyzeRequest { requirement },
            )
            .await?
            .bytes()
            .await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(CoverageAnalysis::from_response(body)?)
    }

    async fn generate(
        &self,
        document_type: DocumentType,
        request: &GenerateRequest<'_>,
    ) -> Result<Value, ServiceError> {
        let bytes = self
            .post_json(&document_type.generate_path(), request)
            .await?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn export(
        &self,
        format: ExportFormat,
        request: &ExportRequest<'_>,
    ) -> Result<Vec<u8>, ServiceError> {
        let path = request.document_type.export_path(format).ok_or(
            ServiceError::UnsupportedRoute {
                action: "export",
                document_type: request.document_type,
            },
        )?;
        let bytes = self.post_json(&path, request).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn health(&self) -> Result<HealthResponse, ServiceError> {
        let response = self.http.get(self.endpoint("/health")).send().await?;
        let bytes = ensure_success("/health", response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
