use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::CandidateQuery;

/// Preferences as submitted by the preferences form.
///
/// Fields a form can get wrong are plain strings and integers here; they are
/// checked by `core::validation`, not by the JSON decoder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub user_type: String,
    #[validate(nested)]
    pub preferences: PreferencesPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPayload {
    #[validate(nested)]
    pub budget: BudgetPayload,
    #[validate(nested)]
    pub climate: ClimatePayload,
    #[validate(nested)]
    pub internet: InternetPayload,
    #[validate(nested)]
    pub time_zone: TimeZonePayload,
    #[serde(default)]
    #[validate(nested)]
    pub stay_duration: StayDurationPayload,
    #[validate(nested)]
    pub amenities: AmenitiesPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub vanlife_specific: Option<VanlifeSpecificPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BudgetPayload {
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub min: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub max: f64,
    #[validate(range(min = 1, max = 3, message = "must be 1, 2 or 3"))]
    pub importance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClimatePayload {
    pub temperature_min: f64,
    pub temperature_max: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub precipitation_max: f64,
    #[serde(default = "default_humidity")]
    pub humidity: String,
    #[validate(range(min = 1, max = 3, message = "must be 1, 2 or 3"))]
    pub importance: i64,
}

fn default_humidity() -> String {
    "any".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InternetPayload {
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub minimum_speed: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "must be a percentage between 0 and 100"))]
    pub reliability: f64,
    #[validate(range(min = 1, max = 3, message = "must be 1, 2 or 3"))]
    pub importance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TimeZonePayload {
    #[serde(default)]
    pub preferred_zones: Vec<String>,
    #[validate(range(min = 1, max = 3, message = "must be 1, 2 or 3"))]
    pub importance: i64,
}

/// Months
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StayDurationPayload {
    #[validate(range(min = 1, message = "must be at least one month"))]
    pub minimum: i64,
    #[validate(range(min = 1, message = "must be at least one month"))]
    pub preferred: i64,
}

impl Default for StayDurationPayload {
    fn default() -> Self {
        Self {
            minimum: 1,
            preferred: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AmenitiesPayload {
    #[serde(default)]
    pub coworking_spaces: bool,
    #[serde(default)]
    pub cafes: bool,
    #[serde(default)]
    pub public_transport: bool,
    #[serde(default)]
    pub healthcare: bool,
    #[serde(default)]
    pub safety: bool,
    #[serde(default)]
    pub nightlife: bool,
    #[validate(range(min = 1, max = 3, message = "must be 1, 2 or 3"))]
    pub importance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VanlifeSpecificPayload {
    #[validate(nested)]
    pub overnight_parking: ImportancePayload,
    #[validate(nested)]
    pub water_access: ImportancePayload,
    #[validate(nested)]
    pub cell_coverage: ImportancePayload,
    #[validate(nested)]
    pub road_conditions: ImportancePayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImportancePayload {
    #[validate(range(min = 1, max = 3, message = "must be 1, 2 or 3"))]
    pub importance: i64,
}

/// Request to rank the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    pub preferences: UserPreferences,
    #[serde(default)]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<u16>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "must be between 0 and 100"))]
    pub min_match: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub friendly_only: bool,
    #[serde(default)]
    pub exclude_ids: Vec<String>,
}

impl FindMatchesRequest {
    /// Pre-filter and truncation options carried by the request
    pub fn candidate_query(&self) -> CandidateQuery {
        CandidateQuery {
            region: self.region.clone().filter(|r| !r.trim().is_empty()),
            country: self.country.clone().filter(|c| !c.trim().is_empty()),
            friendly_only: self.friendly_only,
            exclude_ids: self.exclude_ids.clone(),
            min_match_percentage: self.min_match,
            limit: self.limit.map(usize::from),
        }
    }
}

/// Request to score a single location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLocationRequest {
    pub preferences: UserPreferences,
}
