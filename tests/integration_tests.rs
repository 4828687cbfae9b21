// Integration tests for Nomad Match

use nomad_match::core::{rank, score, validate_preferences, Matcher, MatcherSettings};
use nomad_match::models::{CandidateQuery, Category, Location, PreferenceSet, TravelerProfile, UserPreferences};
use nomad_match::services::{LocationCatalog, StaticCatalog};
use serde_json::{json, Value};
use std::sync::Arc;

fn remote_worker_payload() -> Value {
    json!({
        "userType": "remoteWorker",
        "preferences": {
            "budget": { "min": 1000, "max": 2000, "importance": 2 },
            "climate": { "temperatureMin": 15, "temperatureMax": 30, "precipitationMax": 200, "humidity": "any", "importance": 2 },
            "internet": { "minimumSpeed": 25, "reliability": 80, "importance": 3 },
            "timeZone": { "preferredZones": [], "importance": 1 },
            "stayDuration": { "minimum": 1, "preferred": 3 },
            "amenities": { "importance": 1 }
        }
    })
}

fn vanlifer_payload(parking: i64, water: i64, cell: i64, road: i64) -> Value {
    let mut payload = remote_worker_payload();
    payload["userType"] = json!("vanlifer");
    payload["preferences"]["vanlifeSpecific"] = json!({
        "overnightParking": { "importance": parking },
        "waterAccess": { "importance": water },
        "cellCoverage": { "importance": cell },
        "roadConditions": { "importance": road }
    });
    payload
}

fn preferences(payload: Value) -> PreferenceSet {
    let request: UserPreferences = serde_json::from_value(payload).unwrap();
    validate_preferences(&request).unwrap()
}

async fn embedded_locations() -> Vec<Arc<Location>> {
    StaticCatalog::embedded().unwrap().get_catalog().await.unwrap()
}

#[tokio::test]
async fn test_integration_end_to_end_ranking() {
    let preferences = preferences(remote_worker_payload());
    let ranked = rank(&preferences, embedded_locations().await);

    let ids: Vec<&str> = ranked.iter().map(|r| r.location_id()).collect();
    // Chiang Mai, Medellin and Mexico City tie at 100 and are ordered by cost
    assert_eq!(ids, vec!["2", "3", "6", "1", "4", "5", "7"]);

    assert_eq!(ranked[0].match_percentage, 100.0);
    assert_eq!(ranked[3].match_percentage, 98.3);
    assert_eq!(ranked[3].match_categories[&Category::Climate], 92.5);
    assert_eq!(ranked[6].match_categories[&Category::Budget], 75.0);
}

#[tokio::test]
async fn test_integration_scores_stay_in_bounds() {
    let locations = embedded_locations().await;

    for payload in [remote_worker_payload(), vanlifer_payload(3, 3, 2, 1), vanlifer_payload(1, 1, 1, 1)] {
        let preferences = preferences(payload);
        for result in rank(&preferences, locations.clone()) {
            assert!((0.0..=100.0).contains(&result.match_percentage));
            assert!(result
                .match_categories
                .values()
                .all(|value| (0.0..=100.0).contains(value)));
        }
    }
}

#[tokio::test]
async fn test_integration_vanlifer_categories() {
    let preferences = preferences(vanlifer_payload(3, 3, 2, 1));
    let ranked = rank(&preferences, embedded_locations().await);

    let bend = ranked.iter().find(|r| r.location_id() == "7").unwrap();
    assert_eq!(bend.match_categories.len(), 9);
    assert_eq!(bend.match_categories[&Category::Parking], 75.0);
    assert_eq!(bend.match_categories[&Category::WaterAccess], 100.0);
    assert_eq!(bend.match_categories[&Category::RoadConditions], 100.0);

    // "Poor to Moderate" is not on the rating scale
    let bali = ranked.iter().find(|r| r.location_id() == "4").unwrap();
    assert_eq!(bali.match_categories[&Category::RoadConditions], 50.0);
}

#[tokio::test]
async fn test_integration_vanlife_weights_ignored_for_remote_workers() {
    let locations = embedded_locations().await;

    let mut first = preferences(vanlifer_payload(3, 3, 3, 3));
    let mut second = preferences(vanlifer_payload(1, 2, 1, 2));
    assert_ne!(
        rank(&first, locations.clone())
            .iter()
            .map(|r| r.match_percentage)
            .collect::<Vec<_>>(),
        rank(&second, locations.clone())
            .iter()
            .map(|r| r.match_percentage)
            .collect::<Vec<_>>()
    );

    first.profile = TravelerProfile::RemoteWorker;
    second.profile = TravelerProfile::RemoteWorker;
    let remote = preferences(remote_worker_payload());

    let expected = rank(&remote, locations.clone());
    assert_eq!(rank(&first, locations.clone()), expected);
    assert_eq!(rank(&second, locations), expected);
}

#[tokio::test]
async fn test_integration_rank_is_idempotent() {
    let preferences = preferences(vanlifer_payload(2, 3, 1, 2));
    let locations = embedded_locations().await;

    assert_eq!(rank(&preferences, locations.clone()), rank(&preferences, locations));
}

#[test]
fn test_integration_concrete_scenario() {
    let location: Location = serde_json::from_value(json!({
        "id": "scenario",
        "name": "Scenario City",
        "country": "Portugal",
        "region": "Europe",
        "coordinates": { "lat": 38.7, "lng": -9.1 },
        "costOfLiving": { "overall": 1800, "housing": 800, "food": 400, "transportation": 100 },
        "climate": {
            "averageTemperature": { "winter": 16, "spring": 18, "summer": 24, "fall": 20 },
            "averageRainfall": { "winter": 40, "spring": 30, "summer": 5, "fall": 35 },
            "humidity": "Moderate"
        },
        "internet": { "averageSpeed": 60, "reliability": 95, "publicWifi": "Excellent" },
        "timeZone": "GMT+0",
        "infrastructure": { "healthcare": "Good", "safety": "High", "publicTransport": "Excellent" },
        "digitalNomadFriendly": true,
        "vanliferFriendly": true,
        "vanlifeInfo": {
            "overnightParking": "Moderate",
            "waterAccess": "Good",
            "dumpStations": "Limited",
            "cellCoverage": "Excellent"
        }
    }))
    .unwrap();

    let preferences = preferences(json!({
        "userType": "remoteWorker",
        "preferences": {
            "budget": { "min": 1500, "max": 2500, "importance": 2 },
            "climate": { "temperatureMin": 15, "temperatureMax": 30, "precipitationMax": 100, "importance": 2 },
            "internet": { "minimumSpeed": 25, "reliability": 90, "importance": 3 },
            "timeZone": { "preferredZones": ["gmt0"], "importance": 2 },
            "amenities": { "importance": 1 }
        }
    }));

    let result = score(&preferences, Arc::new(location));

    for category in [Category::Budget, Category::Climate, Category::Internet, Category::TimeZone, Category::Amenities] {
        assert_eq!(result.match_categories[&category], 100.0, "{} should be fully satisfied", category);
    }
    assert_eq!(result.match_categories.len(), 5);
    assert_eq!(result.match_percentage, 100.0);
}

#[tokio::test]
async fn test_integration_overall_monotonic_in_speed() {
    let preferences = preferences(json!({
        "userType": "remoteWorker",
        "preferences": {
            "budget": { "min": 1000, "max": 2000, "importance": 2 },
            "climate": { "temperatureMin": 15, "temperatureMax": 30, "precipitationMax": 200, "importance": 2 },
            "internet": { "minimumSpeed": 200, "reliability": 50, "importance": 3 },
            "timeZone": { "preferredZones": ["GMT+1"], "importance": 2 },
            "amenities": { "nightlife": true, "importance": 1 }
        }
    }));

    let base = embedded_locations().await[0].as_ref().clone();
    let mut previous_internet = 0.0;
    let mut previous_overall = 0.0;

    for speed in [0.0, 20.0, 60.0, 120.0, 199.0, 200.0, 400.0] {
        let mut location = base.clone();
        location.internet.average_speed = speed;
        let result = score(&preferences, Arc::new(location));

        let internet = result.match_categories[&Category::Internet];
        assert!(internet >= previous_internet);
        assert!(result.match_percentage >= previous_overall);
        previous_internet = internet;
        previous_overall = result.match_percentage;
    }
}

#[tokio::test]
async fn test_integration_matcher_pipeline() {
    let matcher = Matcher::new(MatcherSettings {
        min_match_percentage: 0.0,
        default_limit: 20,
        max_limit: 100,
    });
    let locations = embedded_locations().await;

    let vanlifer = preferences(vanlifer_payload(3, 3, 2, 1));
    let friendly = CandidateQuery {
        friendly_only: true,
        ..Default::default()
    };
    let outcome = matcher.find_matches(&vanlifer, locations.clone(), &friendly);
    assert_eq!(outcome.total_candidates, 7);
    assert_eq!(outcome.matches.len(), 5);
    assert!(outcome
        .matches
        .iter()
        .all(|r| r.location_id() != "2" && r.location_id() != "4"));

    let remote = preferences(remote_worker_payload());
    let asia = CandidateQuery {
        region: Some("asia".to_string()),
        ..Default::default()
    };
    let outcome = matcher.find_matches(&remote, locations.clone(), &asia);
    let ids: Vec<&str> = outcome.matches.iter().map(|r| r.location_id()).collect();
    assert_eq!(ids, vec!["2", "4"]);

    let strict = CandidateQuery {
        min_match_percentage: Some(95.0),
        exclude_ids: vec!["3".to_string()],
        limit: Some(2),
        ..Default::default()
    };
    let outcome = matcher.find_matches(&remote, locations, &strict);
    let ids: Vec<&str> = outcome.matches.iter().map(|r| r.location_id()).collect();
    assert_eq!(ids, vec!["2", "6"]);
}

#[tokio::test]
async fn test_integration_result_wire_format() {
    let preferences = preferences(remote_worker_payload());
    let ranked = rank(&preferences, embedded_locations().await);

    let value = serde_json::to_value(&ranked[0]).unwrap();
    assert_eq!(value["city"]["name"], "Chiang Mai");
    assert_eq!(value["matchPercentage"], 100.0);
    assert!(value["matchCategories"]["timeZone"].is_number());
    assert!(value["matchCategories"].get("parking").is_none());
}
