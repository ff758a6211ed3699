use std::cmp::Ordering;

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::provider_repo;
use crate::geo::{self, Coordinate};
use crate::models::ProviderRow;
use crate::session::CallerSession;

pub const CATEGORIES: [&str; 5] = [
    "Healthcare",
    "Home Services",
    "Education",
    "Wellness",
    "Professional Services",
];

#[derive(Debug, Deserialize, Default)]
pub struct ProvidersQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Rating,
    Distance,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Rating => "rating",
            SortMode::Distance => "distance",
        }
    }
}

pub fn parse_sort(input: Option<&str>) -> SortMode {
    match input.unwrap_or("rating") {
        "distance" => SortMode::Distance,
        _ => SortMode::Rating,
    }
}

/// The ranking pipeline: annotate distances, filter by text and category,
/// sort. Pure and re-entrant; runs on every search-box or filter change.
///
/// Providers without a usable coordinate keep `distance_km = None` and,
/// under a distance sort with a known caller position, order as distance
/// zero — they surface ahead of every geocoded provider.
pub fn rank_providers(
    providers: Vec<ProviderRow>,
    caller: Option<Coordinate>,
    query: &str,
    category: &str,
    sort: SortMode,
) -> Vec<ProviderRow> {
    let needle = query.trim().to_lowercase();

    let mut ranked: Vec<ProviderRow> = providers
        .into_iter()
        .map(|mut provider| {
            provider.distance_km = caller.and_then(|from| {
                provider_coordinate(&provider).map(|to| geo::distance_km(from, to))
            });
            provider
        })
        .filter(|provider| {
            let matches_search = needle.is_empty()
                || provider.name.to_lowercase().contains(&needle)
                || provider.specialty.to_lowercase().contains(&needle);
            let matches_category = category == "all" || provider.category == category;
            matches_search && matches_category
        })
        .collect();

    // Vec::sort_by is stable, so ties keep their insertion order.
    match sort {
        SortMode::Rating => ranked.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        SortMode::Distance => ranked.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(0.0)
                .partial_cmp(&b.distance_km.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        }),
    }

    ranked
}

fn provider_coordinate(provider: &ProviderRow) -> Option<Coordinate> {
    Coordinate::new(provider.latitude?, provider.longitude?)
}

#[derive(Clone, Default)]
pub struct AppliedProviderFilters {
    pub search_query: String,
    pub category_value: String,
    pub sort_value: String,
    pub has_location: bool,
    pub notice: String,
}

#[derive(Clone)]
pub struct CategoryOptionView {
    pub name: String,
    pub selected: bool,
}

pub struct ProviderCardView {
    pub provider_id: String,
    pub name: String,
    pub category: String,
    pub specialty: String,
    pub rating_label: String,
    pub review_count: i64,
    pub location_label: String,
    pub distance_label: String,
    pub is_verified: bool,
    pub image_url: String,
}

pub struct ProvidersPageData {
    pub providers: Vec<ProviderCardView>,
    pub filters: AppliedProviderFilters,
    pub category_options: Vec<CategoryOptionView>,
}

pub async fn build_providers_page(
    pool: &SqlitePool,
    session: &CallerSession,
    query: &ProvidersQuery,
) -> sqlx::Result<ProvidersPageData> {
    let rows = provider_repo::list_providers(pool).await?;

    // Explicit query coordinates win over the session's cached one.
    let caller = query
        .lat
        .zip(query.lon)
        .and_then(|(lat, lon)| Coordinate::new(lat, lon))
        .or(session.coordinate);

    let search = query.q.clone().unwrap_or_default();
    let category = query.category.clone().unwrap_or_else(|| "all".to_string());
    let sort = parse_sort(query.sort.as_deref());

    let ranked = rank_providers(rows, caller, &search, &category, sort);

    let filters = AppliedProviderFilters {
        search_query: search,
        category_value: category.clone(),
        sort_value: sort.as_str().to_string(),
        has_location: caller.is_some(),
        notice: query.notice.clone().unwrap_or_default(),
    };

    let category_options = CATEGORIES
        .iter()
        .map(|name| CategoryOptionView {
            name: name.to_string(),
            selected: *name == category,
        })
        .collect();

    Ok(ProvidersPageData {
        providers: ranked.into_iter().map(provider_card).collect(),
        filters,
        category_options,
    })
}

pub fn provider_card(row: ProviderRow) -> ProviderCardView {
    ProviderCardView {
        provider_id: row.provider_id,
        name: row.name,
        category: row.category,
        specialty: row.specialty,
        rating_label: format!("{:.1}", row.rating),
        review_count: row.review_count,
        location_label: row.location.unwrap_or_default(),
        distance_label: row
            .distance_km
            .map(|d| format!("{:.1} km", d))
            .unwrap_or_default(),
        is_verified: row.is_verified.unwrap_or(0) == 1,
        image_url: row.image_url.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(
        id: &str,
        name: &str,
        category: &str,
        specialty: &str,
        rating: f64,
        coord: Option<(f64, f64)>,
    ) -> ProviderRow {
        ProviderRow {
            provider_id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            specialty: specialty.to_string(),
            rating,
            review_count: 50,
            location: Some("Tunis".to_string()),
            latitude: coord.map(|c| c.0),
            longitude: coord.map(|c| c.1),
            is_verified: Some(1),
            image_url: None,
            distance_km: None,
        }
    }

    fn sample() -> Vec<ProviderRow> {
        vec![
            provider("1", "Amira", "Healthcare", "General Practitioner", 4.7, Some((36.8065, 10.1815))),
            provider("2", "Karim", "Home Services", "Plumber", 5.0, Some((35.8256, 10.6411))),
            provider("3", "Leila", "Education", "Math Tutor", 4.9, None),
        ]
    }

    fn ids(ranked: &[ProviderRow]) -> Vec<&str> {
        ranked.iter().map(|p| p.provider_id.as_str()).collect()
    }

    const TUNIS: (f64, f64) = (36.8065, 10.1815);

    #[test]
    fn text_filter_matches_name_case_insensitively() {
        let ranked = rank_providers(sample(), None, "ami", "all", SortMode::Rating);
        assert_eq!(ids(&ranked), vec!["1"]);
    }

    #[test]
    fn text_filter_matches_specialty_too() {
        let ranked = rank_providers(sample(), None, "plumb", "all", SortMode::Rating);
        assert_eq!(ids(&ranked), vec!["2"]);
    }

    #[test]
    fn category_filter_composes_with_search_by_and() {
        let ranked = rank_providers(sample(), None, "", "Home Services", SortMode::Rating);
        assert_eq!(ids(&ranked), vec!["2"]);

        // Name matches, category does not.
        let ranked = rank_providers(sample(), None, "karim", "Education", SortMode::Rating);
        assert!(ranked.is_empty());
    }

    #[test]
    fn empty_query_and_all_category_pass_everything() {
        let ranked = rank_providers(sample(), None, "", "all", SortMode::Rating);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let ranked = rank_providers(sample(), None, "zzzz", "all", SortMode::Rating);
        assert!(ranked.is_empty());
    }

    #[test]
    fn rating_sort_is_descending() {
        let ranked = rank_providers(sample(), None, "", "all", SortMode::Rating);
        let ratings: Vec<f64> = ranked.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![5.0, 4.9, 4.7]);
    }

    #[test]
    fn rating_ties_keep_insertion_order() {
        let rows = vec![
            provider("a", "First", "Healthcare", "GP", 4.8, None),
            provider("b", "Second", "Healthcare", "GP", 4.8, None),
            provider("c", "Third", "Healthcare", "GP", 4.8, None),
        ];
        let ranked = rank_providers(rows, None, "", "all", SortMode::Rating);
        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn distances_are_annotated_only_with_a_caller_coordinate() {
        let caller = Coordinate::new(TUNIS.0, TUNIS.1);

        let ranked = rank_providers(sample(), caller, "", "all", SortMode::Rating);
        let amira = ranked.iter().find(|p| p.provider_id == "1").unwrap();
        let leila = ranked.iter().find(|p| p.provider_id == "3").unwrap();
        assert!(amira.distance_km.is_some());
        assert!(leila.distance_km.is_none());

        let ranked = rank_providers(sample(), None, "", "all", SortMode::Rating);
        assert!(ranked.iter().all(|p| p.distance_km.is_none()));
    }

    #[test]
    fn distance_sort_is_non_decreasing_when_all_geocoded() {
        let rows = vec![
            provider("far", "Karim", "Home Services", "Plumber", 4.7, Some((35.8256, 10.6411))),
            provider("near", "Amira", "Healthcare", "GP", 4.9, Some((36.8065, 10.1815))),
        ];
        let caller = Coordinate::new(TUNIS.0, TUNIS.1);
        let ranked = rank_providers(rows, caller, "", "all", SortMode::Distance);

        assert_eq!(ids(&ranked), vec!["near", "far"]);
        let distances: Vec<f64> = ranked.iter().map(|p| p.distance_km.unwrap()).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ungeocoded_providers_surface_first_under_distance_sort() {
        let caller = Coordinate::new(TUNIS.0, TUNIS.1);
        let ranked = rank_providers(sample(), caller, "", "all", SortMode::Distance);
        // Leila has no coordinate, sorts as zero, lands ahead of everyone.
        assert_eq!(ids(&ranked)[0], "3");
    }

    #[test]
    fn distance_sort_without_caller_preserves_insertion_order() {
        let ranked = rank_providers(sample(), None, "", "all", SortMode::Distance);
        assert_eq!(ids(&ranked), vec!["1", "2", "3"]);
    }

    #[test]
    fn malformed_provider_coordinates_read_as_absent() {
        let rows = vec![provider("bad", "Amira", "Healthcare", "GP", 4.9, Some((f64::NAN, 200.0)))];
        let caller = Coordinate::new(TUNIS.0, TUNIS.1);
        let ranked = rank_providers(rows, caller, "", "all", SortMode::Distance);
        assert!(ranked[0].distance_km.is_none());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let caller = Coordinate::new(TUNIS.0, TUNIS.1);
        let once = rank_providers(sample(), caller, "a", "all", SortMode::Distance);
        let twice = rank_providers(sample(), caller, "a", "all", SortMode::Distance);

        assert_eq!(ids(&once), ids(&twice));
        let d1: Vec<Option<f64>> = once.iter().map(|p| p.distance_km).collect();
        let d2: Vec<Option<f64>> = twice.iter().map(|p| p.distance_km).collect();
        assert_eq!(d1, d2);
    }

    #[test]
    fn sort_parsing_defaults_to_rating() {
        assert_eq!(parse_sort(None), SortMode::Rating);
        assert_eq!(parse_sort(Some("distance")), SortMode::Distance);
        assert_eq!(parse_sort(Some("bogus")), SortMode::Rating);
    }

    #[test]
    fn card_labels_are_precomputed() {
        let mut row = provider("1", "Amira", "Healthcare", "GP", 4.9, None);
        row.distance_km = Some(2.345);
        let card = provider_card(row);
        assert_eq!(card.rating_label, "4.9");
        assert_eq!(card.distance_label, "2.3 km");
        assert!(card.is_verified);
    }
}
