use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use crate::core::timezone::UtcOffset;
use crate::models::domain::{Amenity, Humidity, Location};

/// How much a category matters to the traveler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Importance {
    NiceToHave,
    Important,
    MustHave,
}

impl Importance {
    /// Multiplier used in the weighted average
    pub fn weight(self) -> f64 {
        match self {
            Importance::NiceToHave => 1.0,
            Importance::Important => 2.0,
            Importance::MustHave => 3.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Importance::NiceToHave => "nice to have",
            Importance::Important => "important",
            Importance::MustHave => "must have",
        }
    }
}

impl TryFrom<i64> for Importance {
    type Error = String;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Importance::NiceToHave),
            2 => Ok(Importance::Important),
            3 => Ok(Importance::MustHave),
            other => Err(format!("importance must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<Importance> for i64 {
    fn from(value: Importance) -> Self {
        match value {
            Importance::NiceToHave => 1,
            Importance::Important => 2,
            Importance::MustHave => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumidityPreference {
    Low,
    Moderate,
    High,
    Any,
}

impl HumidityPreference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(HumidityPreference::Low),
            "moderate" => Some(HumidityPreference::Moderate),
            "high" => Some(HumidityPreference::High),
            "any" | "" => Some(HumidityPreference::Any),
            _ => None,
        }
    }

    /// The concrete bucket, `None` when any humidity is accepted
    pub fn bucket(self) -> Option<Humidity> {
        match self {
            HumidityPreference::Low => Some(Humidity::Low),
            HumidityPreference::Moderate => Some(Humidity::Moderate),
            HumidityPreference::High => Some(Humidity::High),
            HumidityPreference::Any => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPreference {
    pub min: f64,
    pub max: f64,
    pub importance: Importance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimatePreference {
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub precipitation_max: f64,
    pub humidity: HumidityPreference,
    pub importance: Importance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetPreference {
    pub minimum_speed: f64,
    pub reliability: f64,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeZonePreference {
    /// Accepted offsets; empty means any zone is accepted
    pub preferred_zones: Vec<UtcOffset>,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityPreference {
    pub required: Vec<Amenity>,
    pub importance: Importance,
}

/// Intended length of stay in months. Validated but not scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayDuration {
    pub minimum: u32,
    pub preferred: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanlifeWeights {
    pub overnight_parking: Importance,
    pub water_access: Importance,
    pub cell_coverage: Importance,
    pub road_conditions: Importance,
}

/// Who is traveling. Vanlife weights exist only on the vanlifer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "userType", rename_all = "camelCase")]
pub enum TravelerProfile {
    RemoteWorker,
    Vanlifer(VanlifeWeights),
}

/// Validated, immutable preferences for one matching request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSet {
    pub profile: TravelerProfile,
    pub budget: BudgetPreference,
    pub climate: ClimatePreference,
    pub internet: InternetPreference,
    pub time_zone: TimeZonePreference,
    pub amenities: AmenityPreference,
    pub stay_duration: StayDuration,
}

impl PreferenceSet {
    /// Categories that take part in the weighted average, with their weights
    pub fn active_categories(&self) -> Vec<(Category, Importance)> {
        let mut categories = vec![
            (Category::Budget, self.budget.importance),
            (Category::Climate, self.climate.importance),
            (Category::Internet, self.internet.importance),
            (Category::TimeZone, self.time_zone.importance),
            (Category::Amenities, self.amenities.importance),
        ];

        if let TravelerProfile::Vanlifer(weights) = &self.profile {
            categories.extend([
                (Category::Parking, weights.overnight_parking),
                (Category::WaterAccess, weights.water_access),
                (Category::CellCoverage, weights.cell_coverage),
                (Category::RoadConditions, weights.road_conditions),
            ]);
        }

        categories
    }

    pub fn is_vanlifer(&self) -> bool {
        matches!(self.profile, TravelerProfile::Vanlifer(_))
    }

    /// Stable key identifying these preferences, used for result caching
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A preference dimension scored independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Budget,
    Climate,
    Internet,
    TimeZone,
    Amenities,
    Parking,
    WaterAccess,
    CellCoverage,
    RoadConditions,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Budget => "budget",
            Category::Climate => "climate",
            Category::Internet => "internet",
            Category::TimeZone => "timeZone",
            Category::Amenities => "amenities",
            Category::Parking => "parking",
            Category::WaterAccess => "waterAccess",
            Category::CellCoverage => "cellCoverage",
            Category::RoadConditions => "roadConditions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score of one location against one preference set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(rename = "city")]
    pub location: Arc<Location>,
    pub match_percentage: f64,
    pub match_categories: BTreeMap<Category, f64>,
}

impl MatchResult {
    pub fn location_id(&self) -> &str {
        &self.location.id
    }
}
