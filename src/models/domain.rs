use serde::{Deserialize, Serialize};
use crate::models::rating::Rating;

/// A city or region in the catalog with cost, climate, connectivity and vanlife data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub country: String,
    pub region: String,
    pub coordinates: Coordinates,
    pub cost_of_living: CostOfLiving,
    pub climate: Climate,
    pub internet: Internet,
    pub time_zone: String,
    pub infrastructure: Infrastructure,
    #[serde(default)]
    pub digital_nomad_friendly: bool,
    #[serde(default)]
    pub vanlifer_friendly: bool,
    pub vanlife_info: VanlifeInfo,
    /// Amenities the location explicitly offers beyond its infrastructure ratings
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Location {
    /// Describe data-quality faults in this record.
    ///
    /// Scoring clamps these values; the catalog reports them.
    pub fn data_quality_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let cost = &self.cost_of_living;

        for (field, value) in [
            ("overall", cost.overall),
            ("housing", cost.housing),
            ("food", cost.food),
            ("transportation", cost.transportation),
        ] {
            if value < 0.0 {
                issues.push(format!("negative {} cost: {}", field, value));
            }
        }

        let components = cost.components_total();
        if cost.overall < components {
            issues.push(format!(
                "overall cost {} is below the sum of its components {}",
                cost.overall, components
            ));
        }

        if self.internet.average_speed < 0.0 {
            issues.push(format!("negative internet speed: {}", self.internet.average_speed));
        }
        if !(0.0..=100.0).contains(&self.internet.reliability) {
            issues.push(format!(
                "internet reliability outside 0-100: {}",
                self.internet.reliability
            ));
        }

        for (season, rainfall) in self.climate.average_rainfall.iter() {
            if rainfall < 0.0 {
                issues.push(format!("negative {} rainfall: {}", season, rainfall));
            }
        }

        issues
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Monthly cost of living in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostOfLiving {
    pub overall: f64,
    pub housing: f64,
    pub food: f64,
    pub transportation: f64,
}

impl CostOfLiving {
    pub fn components_total(&self) -> f64 {
        self.housing + self.food + self.transportation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        };
        f.write_str(name)
    }
}

/// One value per season; the key set is fixed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonalValues {
    pub winter: f64,
    pub spring: f64,
    pub summer: f64,
    pub fall: f64,
}

impl SeasonalValues {
    pub fn uniform(value: f64) -> Self {
        Self {
            winter: value,
            spring: value,
            summer: value,
            fall: value,
        }
    }

    pub fn get(&self, season: Season) -> f64 {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Season, f64)> + '_ {
        Season::ALL.into_iter().map(move |season| (season, self.get(season)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Humidity {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "moderate")]
    Moderate,
    #[serde(alias = "high")]
    High,
}

impl Humidity {
    /// Position on the low-to-high scale
    pub fn level(self) -> i32 {
        match self {
            Humidity::Low => 0,
            Humidity::Moderate => 1,
            Humidity::High => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Climate {
    /// Degrees Celsius
    pub average_temperature: SeasonalValues,
    /// Millimetres
    pub average_rainfall: SeasonalValues,
    pub humidity: Humidity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internet {
    /// Mbps
    pub average_speed: f64,
    /// Percentage uptime, 0-100
    pub reliability: f64,
    pub public_wifi: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Infrastructure {
    pub healthcare: Rating,
    pub safety: Rating,
    pub public_transport: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanlifeInfo {
    pub overnight_parking: Rating,
    pub water_access: Rating,
    pub dump_stations: Rating,
    pub cell_coverage: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_conditions: Option<Rating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Amenity {
    CoworkingSpaces,
    Cafes,
    PublicTransport,
    Healthcare,
    Safety,
    Nightlife,
}

/// Pre-filter constraints applied before scoring
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    pub region: Option<String>,
    pub country: Option<String>,
    /// Keep only locations flagged friendly for the traveler's user type
    pub friendly_only: bool,
    pub exclude_ids: Vec<String>,
    pub min_match_percentage: Option<f64>,
    pub limit: Option<usize>,
}
