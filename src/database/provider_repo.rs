use sqlx::SqlitePool;

use crate::models::{ProviderGeoRow, ProviderRow};

pub const SQL_LIST_PROVIDERS: &str = r#"
SELECT
    provider_id, name, category, specialty, rating, review_count,
    location, latitude, longitude, is_verified, image_url
FROM providers
WHERE (is_deleted = 0 OR is_deleted IS NULL)
LIMIT 500
"#;

const SQL_LIST_FEATURED: &str = r#"
SELECT
    provider_id, name, category, specialty, rating, review_count,
    location, latitude, longitude, is_verified, image_url
FROM providers
WHERE (is_deleted = 0 OR is_deleted IS NULL)
  AND is_verified = 1
ORDER BY rating DESC, review_count DESC
LIMIT ?1
"#;

const SQL_LIST_RECENT: &str = r#"
SELECT
    provider_id, name, category, specialty, rating, review_count,
    location, latitude, longitude, is_verified, image_url
FROM providers
WHERE (is_deleted = 0 OR is_deleted IS NULL)
ORDER BY created_at DESC
LIMIT ?1
"#;

const SQL_LOAD_PROVIDER: &str = r#"
SELECT
    provider_id, name, category, specialty, rating, review_count,
    location, latitude, longitude, is_verified, image_url
FROM providers
WHERE provider_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
"#;

const SQL_COUNT_BY_CATEGORY: &str = r#"
SELECT category, COUNT(*)
FROM providers
WHERE (is_deleted = 0 OR is_deleted IS NULL)
GROUP BY category
"#;

const SQL_LIST_MISSING_GEO: &str = r#"
SELECT provider_id, name, location, latitude, longitude
FROM providers
WHERE (is_deleted = 0 OR is_deleted IS NULL)
  AND (latitude IS NULL OR longitude IS NULL)
LIMIT ?1
"#;

pub async fn list_providers(pool: &SqlitePool) -> sqlx::Result<Vec<ProviderRow>> {
    sqlx::query_as::<_, ProviderRow>(SQL_LIST_PROVIDERS)
        .fetch_all(pool)
        .await
}

pub async fn list_featured(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ProviderRow>> {
    sqlx::query_as::<_, ProviderRow>(SQL_LIST_FEATURED)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn list_recent(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ProviderRow>> {
    sqlx::query_as::<_, ProviderRow>(SQL_LIST_RECENT)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn load_provider(
    pool: &SqlitePool,
    provider_id: &str,
) -> sqlx::Result<Option<ProviderRow>> {
    sqlx::query_as::<_, ProviderRow>(SQL_LOAD_PROVIDER)
        .bind(provider_id)
        .fetch_optional(pool)
        .await
}

pub async fn count_by_category(pool: &SqlitePool) -> sqlx::Result<Vec<(String, i64)>> {
    sqlx::query_as::<_, (String, i64)>(SQL_COUNT_BY_CATEGORY)
        .fetch_all(pool)
        .await
}

pub async fn set_verified(
    pool: &SqlitePool,
    provider_id: &str,
    verified: bool,
) -> sqlx::Result<u64> {
    let res = sqlx::query("UPDATE providers SET is_verified = ?1 WHERE provider_id = ?2")
        .bind(verified as i64)
        .bind(provider_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn list_missing_geo(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ProviderGeoRow>> {
    sqlx::query_as::<_, ProviderGeoRow>(SQL_LIST_MISSING_GEO)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn update_provider_geo(
    pool: &SqlitePool,
    provider_id: &str,
    latitude: f64,
    longitude: f64,
) -> sqlx::Result<u64> {
    let res =
        sqlx::query("UPDATE providers SET latitude = ?1, longitude = ?2 WHERE provider_id = ?3")
            .bind(latitude)
            .bind(longitude)
            .bind(provider_id)
            .execute(pool)
            .await?;
    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // Single connection: every handle must see the same in-memory db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
CREATE TABLE providers (
    provider_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    specialty TEXT NOT NULL,
    rating REAL NOT NULL DEFAULT 0,
    review_count INTEGER NOT NULL DEFAULT 0,
    location TEXT,
    latitude REAL,
    longitude REAL,
    is_verified INTEGER DEFAULT 0,
    image_url TEXT,
    is_deleted INTEGER DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn insert_provider(pool: &SqlitePool, id: &str, name: &str, lat: Option<f64>) {
        sqlx::query(
            r#"
INSERT INTO providers (provider_id, name, category, specialty, rating, review_count, location, latitude, longitude, is_verified)
VALUES (?1, ?2, 'Healthcare', 'General Practitioner', 4.5, 10, 'Tunis', ?3, ?4, 0)
"#,
        )
        .bind(id)
        .bind(name)
        .bind(lat)
        .bind(lat.map(|_| 10.18))
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn load_provider_returns_none_for_unknown_id() {
        let pool = test_pool().await;
        insert_provider(&pool, "p1", "Amira", Some(36.8)).await;

        assert!(load_provider(&pool, "p1").await.unwrap().is_some());
        assert!(load_provider(&pool, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_geo_listing_and_update() {
        let pool = test_pool().await;
        insert_provider(&pool, "p1", "Amira", Some(36.8)).await;
        insert_provider(&pool, "p2", "Karim", None).await;

        let missing = list_missing_geo(&pool, 10).await.unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].provider_id, "p2");

        assert_eq!(update_provider_geo(&pool, "p2", 35.8, 10.6).await.unwrap(), 1);
        assert!(list_missing_geo(&pool, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_verified_flips_the_flag() {
        let pool = test_pool().await;
        insert_provider(&pool, "p1", "Amira", None).await;

        assert_eq!(set_verified(&pool, "p1", true).await.unwrap(), 1);
        let row = load_provider(&pool, "p1").await.unwrap().unwrap();
        assert_eq!(row.is_verified, Some(1));
    }
}
