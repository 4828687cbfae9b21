//! Nomad Match - preference matching service for remote workers and vanlifers
//!
//! Scores every city in a location catalog against a traveler's budget,
//! climate, internet, time-zone and amenity preferences (plus vanlife
//! criteria for vanlifers) and returns them ranked best first.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{rank, score, validate_preferences, Matcher, MatcherSettings, ValidationError};
pub use models::{CandidateQuery, Location, MatchResult, PreferenceSet, UserPreferences};
pub use services::{CacheManager, LocationCatalog, StaticCatalog};
