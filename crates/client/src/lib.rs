//! Typed HTTP wrappers for the GrowLaw backend API.
//!
//! One capability trait per backend concern (directory search, firm
//! analysis, document grading, AI ranking, assistant search) plus the
//! reqwest-backed `GraderClient` implementing all of them. Workflows are
//! generic over the traits so tests can substitute in-memory transports.

use growlaw_model::{
    AnalysisJob, AnalysisRequest, AssistantQuery, AssistantReply, CitySearchResponse,
    ComprehensiveRequest, DocumentGrade, DocumentUpload, Place, RankingReport, RankingRequest,
    SearchQuery, SearchResponse,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use thiserror::Error;

/// Default assistant model when the caller does not pick one.
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature for assistant queries.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Errors from backend API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The message to show the user: the server-supplied text when there is
    /// one, otherwise the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Extract a human-readable message from a JSON error body.
///
/// The backend reports failures as `{"message": "..."}` or `{"error": "..."}`.
fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Directory search over the places endpoints.
pub trait DirectoryApi {
    /// Search for law firms matching the query.
    fn search_firms(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResponse, ApiError>> + Send;

    /// Look up a city by name.
    fn search_city(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<CitySearchResponse, ApiError>> + Send;

    /// Fetch full details for a single place.
    fn place_details(&self, place_id: &str)
        -> impl Future<Output = Result<Place, ApiError>> + Send;
}

/// Firm website analysis jobs.
pub trait AnalysisApi {
    /// Create an analysis job for a firm URL.
    fn create_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisJob, ApiError>> + Send;

    /// Fetch the current state of a job by id.
    fn get_analysis(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<AnalysisJob, ApiError>> + Send;
}

/// Document grading.
pub trait DocumentApi {
    /// Upload a document and await its grade.
    fn analyze_document(
        &self,
        upload: DocumentUpload,
    ) -> impl Future<Output = Result<DocumentGrade, ApiError>> + Send;

    /// All grades recorded by the backend.
    fn analysis_history(&self)
        -> impl Future<Output = Result<Vec<DocumentGrade>, ApiError>> + Send;

    /// A single grade by id.
    fn analysis_by_id(&self, id: &str)
        -> impl Future<Output = Result<DocumentGrade, ApiError>> + Send;
}

/// AI platform visibility checks.
pub trait RankingApi {
    /// Basic visibility check.
    fn check_ranking(
        &self,
        request: &RankingRequest,
    ) -> impl Future<Output = Result<RankingReport, ApiError>> + Send;

    /// Visibility check across all supported platforms.
    fn comprehensive_check(
        &self,
        request: &ComprehensiveRequest,
    ) -> impl Future<Output = Result<RankingReport, ApiError>> + Send;

    /// Diagnostic variant of the comprehensive check.
    fn test_check(
        &self,
        request: &ComprehensiveRequest,
    ) -> impl Future<Output = Result<RankingReport, ApiError>> + Send;
}

/// Assistant-search passthrough.
pub trait AssistantApi {
    /// Send a natural-language query to the assistant endpoint.
    fn ask(
        &self,
        query: &AssistantQuery,
    ) -> impl Future<Output = Result<AssistantReply, ApiError>> + Send;
}

/// Backend API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Reqwest-backed client for the GrowLaw backend.
#[derive(Debug, Clone)]
pub struct GraderClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl GraderClient {
    /// Create a new client for the configured backend.
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body).unwrap_or(body);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path = %path, "GET");
        let response = self
            .client
            .get(self.endpoint(path))
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path = %path, "POST");
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Self::read_json(response).await
    }
}

impl DirectoryApi for GraderClient {
    async fn search_firms(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        let mut params = vec![("query", query.query.clone())];
        if let Some(location) = &query.location {
            params.push(("location", location.clone()));
        }
        if let Some(radius) = query.radius {
            params.push(("radius", radius.to_string()));
        }

        self.get_json("/api/places-test/search", &params).await
    }

    async fn search_city(&self, city: &str) -> Result<CitySearchResponse, ApiError> {
        self.get_json("/api/places/city", &[("city", city.to_string())])
            .await
    }

    async fn place_details(&self, place_id: &str) -> Result<Place, ApiError> {
        self.get_json(&format!("/api/places/{place_id}"), &[]).await
    }
}

impl AnalysisApi for GraderClient {
    async fn create_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisJob, ApiError> {
        self.post_json("/api/analysis", request).await
    }

    async fn get_analysis(&self, job_id: &str) -> Result<AnalysisJob, ApiError> {
        self.get_json(&format!("/api/analysis/{job_id}"), &[]).await
    }
}

impl DocumentApi for GraderClient {
    async fn analyze_document(&self, upload: DocumentUpload) -> Result<DocumentGrade, ApiError> {
        tracing::debug!(file = %upload.file_name, "uploading document for analysis");

        let mut form = reqwest::multipart::Form::new().part(
            "document",
            reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name),
        );
        if let Some(analysis_type) = upload.analysis_type {
            form = form.text("analysisType", analysis_type);
        }

        let response = self
            .client
            .post(self.endpoint("/api/analyze"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn analysis_history(&self) -> Result<Vec<DocumentGrade>, ApiError> {
        self.get_json("/api/analyses", &[]).await
    }

    async fn analysis_by_id(&self, id: &str) -> Result<DocumentGrade, ApiError> {
        self.get_json(&format!("/api/analyses/{id}"), &[]).await
    }
}

impl RankingApi for GraderClient {
    async fn check_ranking(&self, request: &RankingRequest) -> Result<RankingReport, ApiError> {
        self.post_json("/api/check-ai-ranking", request).await
    }

    async fn comprehensive_check(
        &self,
        request: &ComprehensiveRequest,
    ) -> Result<RankingReport, ApiError> {
        self.post_json("/api/comprehensive-check", request).await
    }

    async fn test_check(&self, request: &ComprehensiveRequest) -> Result<RankingReport, ApiError> {
        // The diagnostic endpoint takes a trimmed-down body.
        let body = serde_json::json!({
            "business": request.business,
            "keywords": request.keywords,
            "location": request.location,
            "city": request.city,
        });
        self.post_json("/api/test", &body).await
    }
}

impl AssistantApi for GraderClient {
    async fn ask(&self, query: &AssistantQuery) -> Result<AssistantReply, ApiError> {
        self.post_json("/api/openai/search", &with_assistant_defaults(query))
            .await
    }
}

/// Fill in the model and temperature the backend expects when unset.
fn with_assistant_defaults(query: &AssistantQuery) -> AssistantQuery {
    AssistantQuery {
        message: query.message.clone(),
        model: Some(
            query
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_ASSISTANT_MODEL.to_string()),
        ),
        temperature: Some(query.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
    }
}
