use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::core::validation::FieldViolation;
use crate::models::domain::Location;
use crate::models::preferences::MatchResult;

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub request_id: String,
    pub matches: Vec<MatchResult>,
    pub total_results: usize,
    pub total_candidates: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the single location score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub request_id: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub locations: Vec<Arc<Location>>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_size: Option<usize>,
    pub cache: CacheStats,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Ranking cache counters reported by the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub catalog_generation: u64,
    pub ranked_entries: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
            violations: Vec::new(),
        }
    }

    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = violations;
        self
    }
}
