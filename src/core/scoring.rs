use crate::core::timezone::parse_offset;
use crate::models::{
    Amenity, AmenityPreference, BudgetPreference, Category, ClimatePreference, InternetPreference,
    Location, PreferenceSet, Rating, TimeZonePreference,
};
use crate::models::rating::MAX_ORDINAL;

/// Score given when the data needed to judge a category is missing or unrecognized
pub const NEUTRAL_SCORE: f64 = 50.0;

const FULL_SCORE: f64 = 100.0;

/// Cost at which the budget score reaches zero, as a multiple of the budget ceiling
const BUDGET_CEILING_MULTIPLIER: f64 = 2.0;
const TEMPERATURE_DECAY_PER_DEGREE: f64 = 10.0;
const HUMIDITY_PENALTY_PER_STEP: f64 = 10.0;
const TIME_ZONE_DECAY_PER_HOUR: f64 = 10.0;

/// Score one category (0-100) for a location
///
/// Vanlife categories score neutrally for remote workers; the aggregator
/// never asks for them in that case.
pub fn category_score(category: Category, location: &Location, preferences: &PreferenceSet) -> f64 {
    match category {
        Category::Budget => budget_score(location, &preferences.budget),
        Category::Climate => climate_score(location, &preferences.climate),
        Category::Internet => internet_score(location, &preferences.internet),
        Category::TimeZone => time_zone_score(location, &preferences.time_zone),
        Category::Amenities => amenities_score(location, &preferences.amenities),
        Category::Parking => rating_score(&location.vanlife_info.overnight_parking),
        Category::WaterAccess => rating_score(&location.vanlife_info.water_access),
        Category::CellCoverage => rating_score(&location.vanlife_info.cell_coverage),
        Category::RoadConditions => location
            .vanlife_info
            .road_conditions
            .as_ref()
            .map(rating_score)
            .unwrap_or(NEUTRAL_SCORE),
    }
}

/// Budget score
///
/// Anything up to the ceiling scores 100; cheaper than the floor is never
/// penalized. Above the ceiling the score falls linearly to 0 at twice the ceiling.
pub fn budget_score(location: &Location, budget: &BudgetPreference) -> f64 {
    let cost = location.cost_of_living.overall.max(0.0);
    if cost <= budget.max {
        return FULL_SCORE;
    }

    let zero_at = budget.max * BUDGET_CEILING_MULTIPLIER;
    let span = zero_at - budget.max;
    if span <= 0.0 {
        return 0.0;
    }

    clamp_score(FULL_SCORE * (zero_at - cost) / span)
}

/// Climate score: the mean of four seasonal fits, adjusted for humidity
pub fn climate_score(location: &Location, climate: &ClimatePreference) -> f64 {
    let temperatures = &location.climate.average_temperature;
    let rainfall = &location.climate.average_rainfall;

    let seasonal_total: f64 = temperatures
        .iter()
        .map(|(season, temperature)| {
            season_fit(temperature, rainfall.get(season), climate)
        })
        .sum();
    let seasonal = seasonal_total / 4.0;

    let humidity_penalty = match climate.humidity.bucket() {
        Some(preferred) => {
            let steps = (preferred.level() - location.climate.humidity.level()).abs();
            steps as f64 * HUMIDITY_PENALTY_PER_STEP
        }
        None => 0.0,
    };

    clamp_score(seasonal - humidity_penalty)
}

/// Fit of a single season (0-100)
fn season_fit(temperature: f64, rainfall: f64, climate: &ClimatePreference) -> f64 {
    let degrees_outside = if temperature < climate.temperature_min {
        climate.temperature_min - temperature
    } else if temperature > climate.temperature_max {
        temperature - climate.temperature_max
    } else {
        0.0
    };
    let temperature_fit = clamp_score(FULL_SCORE - degrees_outside * TEMPERATURE_DECAY_PER_DEGREE);

    let rainfall = rainfall.max(0.0);
    let rain_factor = if rainfall <= climate.precipitation_max {
        1.0
    } else if climate.precipitation_max <= 0.0 {
        0.0
    } else {
        climate.precipitation_max / rainfall
    };

    temperature_fit * rain_factor
}

/// Internet score: 100 when both minimums are met, otherwise scaled by the worst shortfall
pub fn internet_score(location: &Location, internet: &InternetPreference) -> f64 {
    let speed_ratio = ratio(location.internet.average_speed, internet.minimum_speed);
    let reliability_ratio = ratio(location.internet.reliability, internet.reliability);

    clamp_score(FULL_SCORE * speed_ratio.min(reliability_ratio))
}

#[inline]
fn ratio(actual: f64, required: f64) -> f64 {
    if required <= 0.0 {
        return 1.0;
    }
    (actual.max(0.0) / required).min(1.0)
}

/// Time zone score
///
/// 100 inside the preferred set (or when no zone was preferred), then 10 points
/// lost per hour to the nearest preferred zone.
pub fn time_zone_score(location: &Location, time_zone: &TimeZonePreference) -> f64 {
    if time_zone.preferred_zones.is_empty() {
        return FULL_SCORE;
    }

    let offset = match parse_offset(&location.time_zone) {
        Ok(offset) => offset,
        Err(_) => return NEUTRAL_SCORE,
    };

    match offset.nearest_hours(&time_zone.preferred_zones) {
        Some(hours) => clamp_score(FULL_SCORE - hours * TIME_ZONE_DECAY_PER_HOUR),
        None => FULL_SCORE,
    }
}

/// Share of the required amenities the location satisfies
pub fn amenities_score(location: &Location, amenities: &AmenityPreference) -> f64 {
    if amenities.required.is_empty() {
        return FULL_SCORE;
    }

    let satisfied = amenities
        .required
        .iter()
        .filter(|amenity| amenity_satisfied(location, **amenity))
        .count();

    clamp_score(FULL_SCORE * satisfied as f64 / amenities.required.len() as f64)
}

/// Whether a location provides an amenity.
///
/// Infrastructure-backed amenities need a rating of at least Good. Coworking
/// and cafes are implied by the digital nomad flag.
pub fn amenity_satisfied(location: &Location, amenity: Amenity) -> bool {
    if location.amenities.contains(&amenity) {
        return true;
    }

    let infrastructure = &location.infrastructure;
    match amenity {
        Amenity::Healthcare => infrastructure.healthcare.meets(&Rating::Good),
        Amenity::Safety => infrastructure.safety.meets(&Rating::Good),
        Amenity::PublicTransport => infrastructure.public_transport.meets(&Rating::Good),
        Amenity::CoworkingSpaces | Amenity::Cafes => location.digital_nomad_friendly,
        Amenity::Nightlife => false,
    }
}

/// Map a qualitative rating onto 0-100 through the shared ordinal table
pub fn rating_score(rating: &Rating) -> f64 {
    match rating.ordinal() {
        Some(ordinal) => FULL_SCORE * ordinal as f64 / MAX_ORDINAL as f64,
        None => NEUTRAL_SCORE,
    }
}

#[inline]
pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, FULL_SCORE)
}
