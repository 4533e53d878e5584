//! Core domain model for GrowLaw AI visibility analysis.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `Firm`: The law firm under configuration, with its keyword set
//! - `Place`: A directory-search candidate
//! - `AnalysisJob` / `JobStatus`: Server-tracked website analysis jobs
//! - `DocumentGrade`: A graded document result
//! - `RankingReport`: Per-platform AI visibility results

use serde::{Deserialize, Serialize};

/// Default practice area assigned when a firm is first selected.
pub const DEFAULT_PRACTICE_AREA: &str = "General Practice";

/// Geographic coordinates as returned by the places endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A candidate firm from a directory search.
///
/// Immutable once received; a set of these is held until the user selects
/// one or starts a new search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub place_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub address: String,

    pub location: Coordinates,

    #[serde(default)]
    pub google_maps_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
}

/// Result set from `GET /api/places-test/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Place>,
    #[serde(default)]
    pub total_results: usize,
}

/// A single hit from the city-lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResult {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    pub location: Coordinates,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub class: String,
}

/// Result set from `GET /api/places/city`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySearchResponse {
    #[serde(default)]
    pub results: Vec<CityResult>,
    #[serde(default)]
    pub total_results: usize,
}

/// Query parameters for a directory search.
///
/// Built fresh on each form submission and discarded once a result set or
/// error is produced.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Free-text firm name
    pub query: String,

    /// Optional location string ("Chicago, IL")
    pub location: Option<String>,

    /// Optional search radius in meters
    pub radius: Option<u32>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }
}

/// The working configuration of the law firm under analysis.
///
/// Created when a directory candidate is selected, mutated in place by
/// practice-area edits and keyword toggles, and discarded when the user
/// navigates back to search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Firm {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub practice_area: String,
    pub location: String,
    /// Duplicate-free, insertion order preserved for display.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Firm {
    /// Map a directory candidate to a working firm.
    ///
    /// The practice area defaults to "General Practice" and the keyword set
    /// starts empty. The research location falls back from the searched
    /// location to the candidate's address.
    pub fn from_place(place: &Place, searched_location: Option<&str>) -> Self {
        Self {
            id: place.place_id.clone(),
            name: place.name.clone(),
            website: place.website.clone(),
            practice_area: DEFAULT_PRACTICE_AREA.to_string(),
            location: searched_location
                .map(str::to_string)
                .unwrap_or_else(|| place.address.clone()),
            keywords: Vec::new(),
        }
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// Toggle a keyword: present removes it, absent appends it.
    ///
    /// Applying the same toggle twice leaves the set unchanged.
    pub fn toggle_keyword(&mut self, keyword: &str) {
        if let Some(pos) = self.keywords.iter().position(|k| k == keyword) {
            self.keywords.remove(pos);
        } else {
            self.keywords.push(keyword.to_string());
        }
    }

    /// Add a user-typed keyword. Trims whitespace; no-op when the trimmed
    /// text is empty or already present. Returns whether anything changed.
    pub fn add_custom_keyword(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.has_keyword(trimmed) {
            return false;
        }
        self.keywords.push(trimmed.to_string());
        true
    }
}

/// Lifecycle status of a server-side analysis job.
///
/// Transitions only move forward: `pending -> processing -> {completed|failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal statuses stop all polling.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

/// Request body for `POST /api/analysis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub firm_url: String,
    pub firm_name: String,
    pub email: String,
}

/// Four-way breakdown attached to a completed firm analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBreakdown {
    pub website_quality: u8,
    pub content_relevance: u8,
    pub user_experience: u8,
    pub legal_compliance: u8,
}

/// Result payload present once a job completes.
///
/// All scores are integers in 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub score: u8,
    pub analysis: AnalysisBreakdown,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// A server-tracked website analysis job.
///
/// Created by `POST /api/analysis`, then replaced wholesale by each polling
/// response until the status is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisJob {
    pub job_id: String,
    pub status: JobStatus,
    pub firm_url: String,
    pub firm_name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<AnalysisResults>,
}

/// A document to submit for grading.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Sent as the `analysisType` multipart field when present.
    pub analysis_type: Option<String>,
}

/// Four-way breakdown attached to a graded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBreakdown {
    pub structure: u8,
    pub content: u8,
    pub legal_accuracy: u8,
    pub clarity: u8,
}

/// Graded result for a single uploaded document.
///
/// Immutable after receipt; no history is retained beyond the current screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGrade {
    pub id: String,
    pub score: u8,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub analysis: GradeBreakdown,
    #[serde(default)]
    pub timestamp: String,
}

/// Request body for `POST /api/check-ai-ranking`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRequest {
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub location: String,
}

/// Request body for `POST /api/comprehensive-check` and `POST /api/test`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveRequest {
    pub business: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Visibility outcome for a single AI platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResult {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub is_visible: bool,
    /// Position among the platform's recommendations; positive when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate summary across all checked platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub total_platforms: u32,
    pub visible_on: u32,
    pub not_visible_on: u32,
    /// Percentage in 0..=100.
    pub visibility_score: u8,
    /// Average rank among visible platforms, absent when visible nowhere.
    #[serde(default)]
    pub average_position: Option<f64>,
    #[serde(default)]
    pub grade: String,
}

/// Full response from an AI-ranking check.
///
/// The platform map is keyed by platform name; a `BTreeMap` keeps display
/// iteration deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default)]
    pub platforms: std::collections::BTreeMap<String, PlatformResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RankingSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Request body for `POST /api/openai/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantQuery {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl AssistantQuery {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            model: None,
            temperature: None,
        }
    }
}

/// Response from the assistant-search endpoint.
///
/// The endpoint reports failures in-band via `error`, even on HTTP 200.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssistantReply {
    /// Fold the in-band error field into a `Result`.
    pub fn into_result(self) -> Result<String, String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or_default()),
        }
    }
}
