use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest ordinal a rating can map to
pub const MAX_ORDINAL: u8 = 4;

/// Qualitative descriptor used across infrastructure, internet and vanlife data
///
/// Every category reads its ordinal from the single table in [`Rating::ordinal`],
/// so "Good" means the same thing for healthcare, parking and cell coverage.
/// Strings outside the table are preserved verbatim as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rating {
    Excellent,
    High,
    Good,
    Improving,
    Moderate,
    Variable,
    Limited,
    Low,
    Poor,
    Restricted,
    Unknown(String),
}

impl Rating {
    /// Parse a rating label, ignoring case and surrounding whitespace
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "excellent" => Rating::Excellent,
            "high" => Rating::High,
            "good" => Rating::Good,
            "improving" => Rating::Improving,
            "moderate" => Rating::Moderate,
            "variable" => Rating::Variable,
            "limited" => Rating::Limited,
            "low" => Rating::Low,
            "poor" => Rating::Poor,
            "restricted" => Rating::Restricted,
            _ => Rating::Unknown(raw.to_string()),
        }
    }

    /// Ordinal rank in `0..=MAX_ORDINAL`, `None` for unrecognized labels
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            Rating::Excellent => Some(4),
            Rating::High | Rating::Good => Some(3),
            Rating::Improving | Rating::Moderate | Rating::Variable => Some(2),
            Rating::Limited | Rating::Low => Some(1),
            Rating::Poor | Rating::Restricted => Some(0),
            Rating::Unknown(_) => None,
        }
    }

    /// Whether this rating ranks at least as high as `threshold`.
    /// Unknown ratings never meet a threshold.
    pub fn meets(&self, threshold: &Rating) -> bool {
        match (self.ordinal(), threshold.ordinal()) {
            (Some(own), Some(required)) => own >= required,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::High => "High",
            Rating::Good => "Good",
            Rating::Improving => "Improving",
            Rating::Moderate => "Moderate",
            Rating::Variable => "Variable",
            Rating::Limited => "Limited",
            Rating::Low => "Low",
            Rating::Poor => "Poor",
            Rating::Restricted => "Restricted",
            Rating::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Rating {
    fn from(value: String) -> Self {
        Rating::parse(&value)
    }
}

impl From<&str> for Rating {
    fn from(value: &str) -> Self {
        Rating::parse(value)
    }
}

impl From<Rating> for String {
    fn from(value: Rating) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
