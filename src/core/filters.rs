use crate::models::{CandidateQuery, Location, TravelerProfile};

/// Check if a location passes the candidate query constraints
///
/// This is the pre-filter stage; it runs before scoring and never affects scores.
#[inline]
pub fn matches_query_constraints(
    location: &Location,
    query: &CandidateQuery,
    profile: &TravelerProfile,
) -> bool {
    if query.exclude_ids.iter().any(|id| id == &location.id) {
        return false;
    }

    if let Some(region) = &query.region {
        if !location.region.eq_ignore_ascii_case(region.trim()) {
            return false;
        }
    }

    if let Some(country) = &query.country {
        if !location.country.eq_ignore_ascii_case(country.trim()) {
            return false;
        }
    }

    if query.friendly_only && !is_friendly_for(location, profile) {
        return false;
    }

    true
}

/// Whether the location is flagged as welcoming for this kind of traveler
#[inline]
pub fn is_friendly_for(location: &Location, profile: &TravelerProfile) -> bool {
    match profile {
        TravelerProfile::RemoteWorker => location.digital_nomad_friendly,
        TravelerProfile::Vanlifer(_) => location.vanlifer_friendly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Importance, VanlifeWeights};

    fn create_test_location(id: &str, region: &str, nomad: bool, vanlife: bool) -> Location {
        let json = serde_json::json!({
            "id": id,
            "name": format!("City {}", id),
            "country": "Portugal",
            "region": region,
            "coordinates": { "lat": 38.7, "lng": -9.1 },
            "costOfLiving": { "overall": 1800, "housing": 800, "food": 400, "transportation": 100 },
            "climate": {
                "averageTemperature": { "winter": 12, "spring": 16, "summer": 24, "fall": 18 },
                "averageRainfall": { "winter": 110, "spring": 65, "summer": 6, "fall": 80 },
                "humidity": "Moderate"
            },
            "internet": { "averageSpeed": 60, "reliability": 95, "publicWifi": "Excellent" },
            "timeZone": "GMT+0",
            "infrastructure": { "healthcare": "Good", "safety": "High", "publicTransport": "Excellent" },
            "digitalNomadFriendly": nomad,
            "vanliferFriendly": vanlife,
            "vanlifeInfo": {
                "overnightParking": "Moderate",
                "waterAccess": "Good",
                "dumpStations": "Limited",
                "cellCoverage": "Excellent"
            }
        });
        serde_json::from_value(json).unwrap()
    }

    fn vanlifer() -> TravelerProfile {
        TravelerProfile::Vanlifer(VanlifeWeights {
            overnight_parking: Importance::MustHave,
            water_access: Importance::MustHave,
            cell_coverage: Importance::Important,
            road_conditions: Importance::Important,
        })
    }

    #[test]
    fn test_empty_query_accepts_everything() {
        let location = create_test_location("1", "Europe", false, false);
        assert!(matches_query_constraints(&location, &CandidateQuery::default(), &TravelerProfile::RemoteWorker));
    }

    #[test]
    fn test_excluded_ids() {
        let location = create_test_location("1", "Europe", true, true);
        let query = CandidateQuery {
            exclude_ids: vec!["1".to_string()],
            ..Default::default()
        };
        assert!(!matches_query_constraints(&location, &query, &TravelerProfile::RemoteWorker));
    }

    #[test]
    fn test_region_is_case_insensitive() {
        let location = create_test_location("1", "South America", true, true);
        let query = CandidateQuery {
            region: Some("south america".to_string()),
            ..Default::default()
        };
        assert!(matches_query_constraints(&location, &query, &TravelerProfile::RemoteWorker));

        let other = CandidateQuery {
            region: Some("Asia".to_string()),
            ..Default::default()
        };
        assert!(!matches_query_constraints(&location, &other, &TravelerProfile::RemoteWorker));
    }

    #[test]
    fn test_friendly_only_depends_on_user_type() {
        let location = create_test_location("2", "Asia", true, false);
        let query = CandidateQuery {
            friendly_only: true,
            ..Default::default()
        };
        assert!(matches_query_constraints(&location, &query, &TravelerProfile::RemoteWorker));
        assert!(!matches_query_constraints(&location, &query, &vanlifer()));
    }
}
