use sqlx::SqlitePool;

use crate::models::CurrentUserRow;

// Offline/local fallback: a single-row table naming the acting user when no
// auth service is reachable.
pub async fn load_current_user_id(pool: &SqlitePool) -> sqlx::Result<Option<String>> {
    let row = sqlx::query_as::<_, CurrentUserRow>("SELECT user_id FROM current_user LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| r.user_id))
}
