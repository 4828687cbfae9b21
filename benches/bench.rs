// Criterion benchmarks for Nomad Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nomad_match::core::{parse_offset, rank, score, validate_preferences, Matcher};
use nomad_match::models::{CandidateQuery, Location, PreferenceSet, UserPreferences};
use serde_json::json;
use std::sync::Arc;

const RATINGS: [&str; 6] = ["Excellent", "Good", "Moderate", "Limited", "Poor", "Restricted"];
const REGIONS: [&str; 4] = ["Europe", "Asia", "South America", "North America"];

fn create_location(id: usize) -> Arc<Location> {
    let rating = |salt: usize| RATINGS[(id + salt) % RATINGS.len()];
    let json = json!({
        "id": id.to_string(),
        "name": format!("City {}", id),
        "country": "Benchland",
        "region": REGIONS[id % REGIONS.len()],
        "coordinates": { "lat": (id % 180) as f64 - 90.0, "lng": (id % 360) as f64 - 180.0 },
        "costOfLiving": {
            "overall": 800.0 + (id % 40) as f64 * 75.0,
            "housing": 400.0,
            "food": 250.0,
            "transportation": 80.0
        },
        "climate": {
            "averageTemperature": {
                "winter": (id % 20) as f64 - 2.0,
                "spring": 10.0 + (id % 12) as f64,
                "summer": 18.0 + (id % 15) as f64,
                "fall": 8.0 + (id % 14) as f64
            },
            "averageRainfall": {
                "winter": (id % 300) as f64,
                "spring": (id % 150) as f64,
                "summer": (id % 90) as f64,
                "fall": (id % 200) as f64
            },
            "humidity": ["Low", "Moderate", "High"][id % 3]
        },
        "internet": {
            "averageSpeed": 5.0 + (id % 120) as f64,
            "reliability": 60.0 + (id % 40) as f64,
            "publicWifi": rating(0)
        },
        "timeZone": format!("GMT{:+}", (id % 25) as i32 - 12),
        "infrastructure": {
            "healthcare": rating(1),
            "safety": rating(2),
            "publicTransport": rating(3)
        },
        "digitalNomadFriendly": id % 2 == 0,
        "vanliferFriendly": id % 3 != 0,
        "vanlifeInfo": {
            "overnightParking": rating(4),
            "waterAccess": rating(5),
            "dumpStations": rating(6),
            "cellCoverage": rating(7),
            "roadConditions": rating(8)
        }
    });
    Arc::new(serde_json::from_value(json).unwrap())
}

fn create_preferences(user_type: &str) -> PreferenceSet {
    let mut payload = json!({
        "userType": user_type,
        "preferences": {
            "budget": { "min": 1000, "max": 2000, "importance": 2 },
            "climate": { "temperatureMin": 15, "temperatureMax": 28, "precipitationMax": 100, "humidity": "moderate", "importance": 2 },
            "internet": { "minimumSpeed": 50, "reliability": 90, "importance": 3 },
            "timeZone": { "preferredZones": ["GMT-5", "GMT+0", "GMT+1"], "importance": 2 },
            "amenities": { "coworkingSpaces": true, "healthcare": true, "safety": true, "importance": 1 }
        }
    });
    if user_type == "vanlifer" {
        payload["preferences"]["vanlifeSpecific"] = json!({
            "overnightParking": { "importance": 3 },
            "waterAccess": { "importance": 3 },
            "cellCoverage": { "importance": 2 },
            "roadConditions": { "importance": 1 }
        });
    }
    let request: UserPreferences = serde_json::from_value(payload).unwrap();
    validate_preferences(&request).unwrap()
}

fn bench_parse_offset(c: &mut Criterion) {
    c.bench_function("parse_offset", |b| {
        b.iter(|| parse_offset(black_box("UTC-03:30")));
    });
}

fn bench_score(c: &mut Criterion) {
    let preferences = create_preferences("vanlifer");
    let location = create_location(42);

    c.bench_function("score_single_location", |b| {
        b.iter(|| score(black_box(&preferences), black_box(location.clone())));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for user_type in ["remoteWorker", "vanlifer"] {
        let preferences = create_preferences(user_type);

        for location_count in [10, 100, 1000, 10000].iter() {
            let locations: Vec<Arc<Location>> = (0..*location_count).map(create_location).collect();

            group.bench_with_input(
                BenchmarkId::new(format!("rank_{}", user_type), location_count),
                location_count,
                |b, _| {
                    b.iter(|| rank(black_box(&preferences), black_box(locations.iter().cloned())));
                },
            );
        }
    }

    group.finish();
}

fn bench_matcher_pipeline(c: &mut Criterion) {
    let matcher = Matcher::with_default_settings();
    let preferences = create_preferences("remoteWorker");
    let locations: Vec<Arc<Location>> = (0..1000).map(create_location).collect();
    let query = CandidateQuery {
        region: Some("Europe".to_string()),
        friendly_only: true,
        min_match_percentage: Some(40.0),
        ..Default::default()
    };

    c.bench_function("find_matches_1000_locations", |b| {
        b.iter(|| matcher.find_matches(black_box(&preferences), black_box(locations.clone()), black_box(&query)));
    });

    let ranked = rank(&preferences, locations.iter().cloned());
    c.bench_function("select_from_cached_ranking_1000", |b| {
        b.iter(|| matcher.select(black_box(&preferences), black_box(&ranked), black_box(&query)));
    });
}

criterion_group!(
    benches,
    bench_parse_offset,
    bench_score,
    bench_ranking,
    bench_matcher_pipeline
);

criterion_main!(benches);
