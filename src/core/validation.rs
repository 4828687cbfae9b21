use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};
use crate::core::timezone::{parse_offset, UtcOffset};
use crate::models::domain::{Amenity, CandidateQuery};
use crate::models::preferences::{
    AmenityPreference, BudgetPreference, ClimatePreference, HumidityPreference, Importance,
    InternetPreference, PreferenceSet, StayDuration, TimeZonePreference, TravelerProfile,
    VanlifeWeights,
};
use crate::models::requests::{AmenitiesPayload, FindMatchesRequest, UserPreferences, VanlifeSpecificPayload};

/// A single rejected field, addressed by its camelCase JSON path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every problem found in a preference submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid preferences: {}", describe(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Re-root every violation path under `prefix`
    pub fn nested_under(self, prefix: &str) -> Self {
        Self {
            violations: self
                .violations
                .into_iter()
                .map(|v| FieldViolation::new(join_path(prefix, &v.field), v.message))
                .collect(),
        }
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserType {
    RemoteWorker,
    Vanlifer,
}

impl UserType {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "remoteworker" | "remote_worker" | "remote-worker" => Some(UserType::RemoteWorker),
            "vanlifer" => Some(UserType::Vanlifer),
            _ => None,
        }
    }
}

/// Check a preference submission and normalize it into a [`PreferenceSet`].
///
/// All violations are collected before returning, so a form can highlight
/// every bad field at once. An empty preferred time-zone list is valid and
/// means any zone is accepted.
pub fn validate_preferences(request: &UserPreferences) -> Result<PreferenceSet, ValidationError> {
    let mut violations = Vec::new();

    // Field-level ranges declared on the payload types
    if let Err(errors) = request.validate() {
        flatten_errors("", &errors, &mut violations);
    }

    let prefs = &request.preferences;

    let user_type = UserType::parse(&request.user_type);
    if user_type.is_none() {
        violations.push(FieldViolation::new(
            "userType",
            format!("must be remoteWorker or vanlifer, got {:?}", request.user_type),
        ));
    }

    if prefs.budget.min > prefs.budget.max {
        violations.push(FieldViolation::new(
            "preferences.budget",
            format!("min {} exceeds max {}", prefs.budget.min, prefs.budget.max),
        ));
    }

    if prefs.climate.temperature_min > prefs.climate.temperature_max {
        violations.push(FieldViolation::new(
            "preferences.climate",
            format!(
                "temperatureMin {} exceeds temperatureMax {}",
                prefs.climate.temperature_min, prefs.climate.temperature_max
            ),
        ));
    }

    let humidity = HumidityPreference::parse(&prefs.climate.humidity);
    if humidity.is_none() {
        violations.push(FieldViolation::new(
            "preferences.climate.humidity",
            format!("must be low, moderate, high or any, got {:?}", prefs.climate.humidity),
        ));
    }

    if prefs.stay_duration.minimum > prefs.stay_duration.preferred {
        violations.push(FieldViolation::new(
            "preferences.stayDuration",
            format!(
                "minimum {} exceeds preferred {}",
                prefs.stay_duration.minimum, prefs.stay_duration.preferred
            ),
        ));
    }

    let mut zones: Vec<UtcOffset> = Vec::with_capacity(prefs.time_zone.preferred_zones.len());
    for (index, label) in prefs.time_zone.preferred_zones.iter().enumerate() {
        match parse_offset(label) {
            Ok(offset) => {
                if !zones.contains(&offset) {
                    zones.push(offset);
                }
            }
            Err(e) => violations.push(FieldViolation::new(
                format!("preferences.timeZone.preferredZones[{}]", index),
                e.to_string(),
            )),
        }
    }
    zones.sort();

    match (user_type, &prefs.vanlife_specific) {
        (Some(UserType::Vanlifer), None) => violations.push(FieldViolation::new(
            "preferences.vanlifeSpecific",
            "required when userType is vanlifer",
        )),
        (Some(UserType::RemoteWorker), Some(_)) => violations.push(FieldViolation::new(
            "preferences.vanlifeSpecific",
            "must be absent when userType is remoteWorker",
        )),
        _ => {}
    }

    if !violations.is_empty() {
        violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        violations.dedup();
        return Err(ValidationError { violations });
    }

    let profile = match (user_type, &prefs.vanlife_specific) {
        (Some(UserType::Vanlifer), Some(vanlife)) => TravelerProfile::Vanlifer(vanlife_weights(vanlife)?),
        _ => TravelerProfile::RemoteWorker,
    };

    Ok(PreferenceSet {
        profile,
        budget: BudgetPreference {
            min: prefs.budget.min,
            max: prefs.budget.max,
            importance: importance("preferences.budget.importance", prefs.budget.importance)?,
        },
        climate: ClimatePreference {
            temperature_min: prefs.climate.temperature_min,
            temperature_max: prefs.climate.temperature_max,
            precipitation_max: prefs.climate.precipitation_max,
            humidity: humidity.unwrap_or(HumidityPreference::Any),
            importance: importance("preferences.climate.importance", prefs.climate.importance)?,
        },
        internet: InternetPreference {
            minimum_speed: prefs.internet.minimum_speed,
            reliability: prefs.internet.reliability,
            importance: importance("preferences.internet.importance", prefs.internet.importance)?,
        },
        time_zone: TimeZonePreference {
            preferred_zones: zones,
            importance: importance("preferences.timeZone.importance", prefs.time_zone.importance)?,
        },
        amenities: AmenityPreference {
            required: selected_amenities(&prefs.amenities),
            importance: importance("preferences.amenities.importance", prefs.amenities.importance)?,
        },
        stay_duration: StayDuration {
            minimum: months("preferences.stayDuration.minimum", prefs.stay_duration.minimum)?,
            preferred: months("preferences.stayDuration.preferred", prefs.stay_duration.preferred)?,
        },
    })
}

/// Check a find-matches body: the embedded preferences plus its query options
///
/// Preference paths are reported under `preferences.` as they appear in the body.
pub fn validate_find_request(request: &FindMatchesRequest) -> Result<(PreferenceSet, CandidateQuery), ValidationError> {
    let mut violations = Vec::new();

    // `preferences` carries no derive rules of its own at this level
    if let Err(errors) = request.validate() {
        flatten_errors("", &errors, &mut violations);
    }

    let preferences = match validate_preferences(&request.preferences) {
        Ok(preferences) => Some(preferences),
        Err(error) => {
            violations.extend(error.nested_under("preferences").violations);
            None
        }
    };

    match preferences {
        Some(preferences) if violations.is_empty() => Ok((preferences, request.candidate_query())),
        _ => {
            violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
            violations.dedup();
            Err(ValidationError { violations })
        }
    }
}

fn importance(field: &str, level: i64) -> Result<Importance, ValidationError> {
    Importance::try_from(level).map_err(|message| ValidationError {
        violations: vec![FieldViolation::new(field, message)],
    })
}

fn months(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError {
        violations: vec![FieldViolation::new(field, "out of range")],
    })
}

fn vanlife_weights(payload: &VanlifeSpecificPayload) -> Result<VanlifeWeights, ValidationError> {
    Ok(VanlifeWeights {
        overnight_parking: importance(
            "preferences.vanlifeSpecific.overnightParking.importance",
            payload.overnight_parking.importance,
        )?,
        water_access: importance(
            "preferences.vanlifeSpecific.waterAccess.importance",
            payload.water_access.importance,
        )?,
        cell_coverage: importance(
            "preferences.vanlifeSpecific.cellCoverage.importance",
            payload.cell_coverage.importance,
        )?,
        road_conditions: importance(
            "preferences.vanlifeSpecific.roadConditions.importance",
            payload.road_conditions.importance,
        )?,
    })
}

fn selected_amenities(payload: &AmenitiesPayload) -> Vec<Amenity> {
    [
        (payload.coworking_spaces, Amenity::CoworkingSpaces),
        (payload.cafes, Amenity::Cafes),
        (payload.public_transport, Amenity::PublicTransport),
        (payload.healthcare, Amenity::Healthcare),
        (payload.safety, Amenity::Safety),
        (payload.nightlife, Amenity::Nightlife),
    ]
    .into_iter()
    .filter_map(|(selected, amenity)| selected.then_some(amenity))
    .collect()
}

/// Turn nested `validator` errors into dotted camelCase paths
fn flatten_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &to_camel_case(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(FieldViolation::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
