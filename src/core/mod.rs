// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod timezone;
pub mod validation;

pub use filters::{matches_query_constraints, is_friendly_for};
pub use matcher::{Matcher, MatcherSettings, MatchOutcome, score, rank, compare_results};
pub use scoring::{category_score, budget_score, climate_score, internet_score, time_zone_score, amenities_score, rating_score, NEUTRAL_SCORE};
pub use timezone::{parse_offset, UtcOffset, TimeZoneParseError};
pub use validation::{validate_preferences, validate_find_request, ValidationError, FieldViolation};
