use sqlx::SqlitePool;

// Dashboard scalars. Each one is a plain aggregate so a missing table shows
// up as an error, not a silent zero.

pub async fn count_providers(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM providers WHERE (is_deleted = 0 OR is_deleted IS NULL)",
    )
    .fetch_one(pool)
    .await
}

pub async fn count_bookings(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM bookings").fetch_one(pool).await
}

pub async fn average_provider_rating(pool: &SqlitePool) -> sqlx::Result<Option<f64>> {
    sqlx::query_scalar(
        "SELECT AVG(rating) FROM providers WHERE (is_deleted = 0 OR is_deleted IS NULL)",
    )
    .fetch_one(pool)
    .await
}

pub async fn count_active_users(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
SELECT COUNT(DISTINCT user_id)
FROM activity_logs
WHERE created_at >= datetime('now', '-30 day')
"#,
    )
    .fetch_one(pool)
    .await
}
