use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use crate::core::{filters::matches_query_constraints, scoring::{category_score, clamp_score}};
use crate::models::{CandidateQuery, Location, MatchResult, PreferenceSet};

/// Outcome of the matching pipeline
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Score one location against validated preferences
///
/// The overall percentage is the importance-weighted mean of the active
/// categories. Vanlife categories only take part for vanlifers.
pub fn score(preferences: &PreferenceSet, location: Arc<Location>) -> MatchResult {
    let mut match_categories = BTreeMap::new();
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (category, importance) in preferences.active_categories() {
        let category_value = category_score(category, &location, preferences);
        weighted_sum += category_value * importance.weight();
        total_weight += importance.weight();
        match_categories.insert(category, round_score(category_value));
    }

    let overall = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };

    MatchResult {
        location,
        match_percentage: round_score(clamp_score(overall)),
        match_categories,
    }
}

/// Score every location and order the results best first
///
/// Ties on the overall percentage go to the cheaper location, then to the
/// lower id, so the order is fully reproducible.
pub fn rank<I>(preferences: &PreferenceSet, locations: I) -> Vec<MatchResult>
where
    I: IntoIterator<Item = Arc<Location>>,
{
    let mut results: Vec<MatchResult> = locations
        .into_iter()
        .map(|location| score(preferences, location))
        .collect();

    results.sort_by(compare_results);
    results
}

/// Ranking order: overall descending, cost ascending, id ascending
pub fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.match_percentage
        .total_cmp(&a.match_percentage)
        .then_with(|| {
            a.location
                .cost_of_living
                .overall
                .total_cmp(&b.location.cost_of_living.overall)
        })
        .then_with(|| a.location.id.cmp(&b.location.id))
}

/// One decimal place
#[inline]
fn round_score(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Limits applied when turning a ranking into a response
#[derive(Debug, Clone, Copy)]
pub struct MatcherSettings {
    pub min_match_percentage: f64,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            min_match_percentage: 0.0,
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// Matching orchestrator
///
/// # Pipeline Stages
/// 1. Candidate pre-filter (region, country, friendliness, exclusions)
/// 2. Per-category scoring and weighted aggregation
/// 3. Minimum match floor
/// 4. Ranking and limit
#[derive(Debug, Clone)]
pub struct Matcher {
    settings: MatcherSettings,
}

impl Matcher {
    pub fn new(settings: MatcherSettings) -> Self {
        Self { settings }
    }

    pub fn with_default_settings() -> Self {
        Self {
            settings: MatcherSettings::default(),
        }
    }

    pub fn settings(&self) -> &MatcherSettings {
        &self.settings
    }

    /// Run the full pipeline over a materialized catalog
    pub fn find_matches(
        &self,
        preferences: &PreferenceSet,
        locations: Vec<Arc<Location>>,
        query: &CandidateQuery,
    ) -> MatchOutcome {
        let total_candidates = locations.len();

        let candidates = locations
            .into_iter()
            .filter(|location| matches_query_constraints(location, query, &preferences.profile));
        let ranked = rank(preferences, candidates);

        tracing::debug!(
            "Scored {} of {} locations",
            ranked.len(),
            total_candidates
        );

        let matches = self.finish(ranked.into_iter(), query);

        MatchOutcome {
            matches,
            total_candidates,
        }
    }

    /// Apply the query to an already ranked list
    ///
    /// Filtering a ranked list keeps its order, so this yields the same
    /// matches as [`Matcher::find_matches`] over the same catalog.
    pub fn select(
        &self,
        preferences: &PreferenceSet,
        ranked: &[MatchResult],
        query: &CandidateQuery,
    ) -> MatchOutcome {
        let candidates = ranked
            .iter()
            .filter(|result| matches_query_constraints(&result.location, query, &preferences.profile))
            .cloned();

        MatchOutcome {
            matches: self.finish(candidates, query),
            total_candidates: ranked.len(),
        }
    }

    fn finish<I>(&self, ranked: I, query: &CandidateQuery) -> Vec<MatchResult>
    where
        I: Iterator<Item = MatchResult>,
    {
        let floor = query
            .min_match_percentage
            .unwrap_or(self.settings.min_match_percentage);
        let limit = query
            .limit
            .unwrap_or(self.settings.default_limit)
            .min(self.settings.max_limit);

        ranked
            .filter(|result| result.match_percentage >= floor)
            .take(limit)
            .collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_settings()
    }
}
