// Model exports
pub mod domain;
pub mod preferences;
pub mod rating;
pub mod requests;
pub mod responses;

pub use domain::{Location, Coordinates, CostOfLiving, Climate, Internet, Infrastructure, VanlifeInfo, SeasonalValues, Season, Humidity, Amenity, CandidateQuery};
pub use preferences::{PreferenceSet, TravelerProfile, VanlifeWeights, Importance, HumidityPreference, BudgetPreference, ClimatePreference, InternetPreference, TimeZonePreference, AmenityPreference, StayDuration, Category, MatchResult};
pub use rating::Rating;
pub use requests::{UserPreferences, PreferencesPayload, FindMatchesRequest, ScoreLocationRequest};
pub use responses::{FindMatchesResponse, ScoreResponse, CatalogResponse, HealthResponse, CacheStats, ErrorResponse};
