use sqlx::SqlitePool;

use crate::models::ReviewRow;

const SQL_LIST_FOR_PROVIDER: &str = r#"
SELECT review_id, provider_id, author_name, rating, body, created_at
FROM reviews
WHERE provider_id = ?1
ORDER BY created_at DESC
LIMIT ?2
"#;

const SQL_LIST_RECENT: &str = r#"
SELECT review_id, provider_id, author_name, rating, body, created_at
FROM reviews
ORDER BY created_at DESC
LIMIT ?1
"#;

pub async fn list_for_provider(
    pool: &SqlitePool,
    provider_id: &str,
    limit: i64,
) -> sqlx::Result<Vec<ReviewRow>> {
    sqlx::query_as::<_, ReviewRow>(SQL_LIST_FOR_PROVIDER)
        .bind(provider_id)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn list_recent(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ReviewRow>> {
    sqlx::query_as::<_, ReviewRow>(SQL_LIST_RECENT)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn delete_review(pool: &SqlitePool, review_id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query("DELETE FROM reviews WHERE review_id = ?1")
        .bind(review_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
