use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;
use tracing::warn;

use crate::database::provider_repo;
use crate::services::location_service;

#[derive(Debug, Default)]
pub struct ProviderGeoBackfillReport {
    pub candidates: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Geocodes providers that have a location label but no coordinates yet.
/// Missing coordinates only degrade distance sorting, so every failure here
/// is counted and skipped, never fatal.
pub async fn backfill_provider_geo(
    pool: &SqlitePool,
    limit: i64,
) -> sqlx::Result<ProviderGeoBackfillReport> {
    let candidates = provider_repo::list_missing_geo(pool, limit).await?;
    let mut report = ProviderGeoBackfillReport {
        candidates: candidates.len(),
        ..Default::default()
    };

    let mut cache: HashMap<String, (f64, f64)> = HashMap::new();

    for row in candidates {
        if row.latitude.is_some() && row.longitude.is_some() {
            report.skipped += 1;
            continue;
        }

        let queries = build_queries(row.location.as_deref(), &row.name);

        let mut chosen: Option<(f64, f64)> = None;
        for query in queries {
            let cache_key = query.to_lowercase();
            if let Some(coords) = cache.get(&cache_key).copied() {
                chosen = Some(coords);
                break;
            }

            let coords = match location_service::search_places_upstream(&query, 3).await {
                Ok(results) => results.first().map(|r| (r.latitude, r.longitude)),
                Err(_) => {
                    report.failed += 1;
                    chosen = None;
                    break;
                }
            };

            if let Some(coords) = coords {
                cache.insert(cache_key, coords);
                chosen = Some(coords);
                break;
            }
        }

        let Some((lat, lon)) = chosen else {
            warn!(
                "📍 No coords found for provider {} (name='{}')",
                row.provider_id, row.name
            );
            report.failed += 1;
            continue;
        };

        let updated = provider_repo::update_provider_geo(pool, &row.provider_id, lat, lon).await?;
        if updated > 0 {
            report.updated += 1;
        } else {
            report.failed += 1;
        }
    }

    info!(
        "📍 Provider geo backfill done: candidates={}, updated={}, skipped={}, failed={}",
        report.candidates, report.updated, report.skipped, report.failed
    );

    Ok(report)
}

// Most specific query first; the bare location label is usually enough.
fn build_queries(location: Option<&str>, name: &str) -> Vec<String> {
    let mut queries = Vec::new();

    if let Some(loc) = location.map(str::trim).filter(|s| !s.is_empty()) {
        queries.push(format!("{} Tunisia", loc));
        queries.push(loc.to_string());
    }

    if queries.is_empty() {
        queries.push(name.trim().to_string());
    }

    let mut seen = std::collections::HashSet::new();
    queries
        .into_iter()
        .filter(|q| !q.is_empty() && seen.insert(q.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_prefer_the_location_label() {
        let queries = build_queries(Some("La Marsa"), "Salma Hamdi");
        assert_eq!(queries, vec!["La Marsa Tunisia".to_string(), "La Marsa".to_string()]);
    }

    #[test]
    fn queries_fall_back_to_the_provider_name() {
        let queries = build_queries(None, "Salma Hamdi");
        assert_eq!(queries, vec!["Salma Hamdi".to_string()]);

        let queries = build_queries(Some("  "), "Salma Hamdi");
        assert_eq!(queries, vec!["Salma Hamdi".to_string()]);
    }
}
