use sqlx::SqlitePool;

use crate::models::ActivityLogRow;

const SQL_INSERT_LOG: &str = r#"
INSERT INTO activity_logs (
  log_id,
  user_id,
  action_type,
  details
) VALUES (?, ?, ?, ?)
"#;

const SQL_LIST_RECENT_FOR_USER: &str = r#"
SELECT log_id, user_id, action_type, details, created_at
FROM activity_logs
WHERE user_id = ?1
ORDER BY created_at DESC
LIMIT ?2
"#;

pub struct NewActivityLog<'a> {
    pub log_id: &'a str,
    pub user_id: &'a str,
    pub action_type: &'a str,
    pub details: Option<&'a str>,
}

pub async fn insert_log(pool: &SqlitePool, log: NewActivityLog<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_LOG)
        .bind(log.log_id)
        .bind(log.user_id)
        .bind(log.action_type)
        .bind(log.details)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn list_recent_for_user(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> sqlx::Result<Vec<ActivityLogRow>> {
    sqlx::query_as::<_, ActivityLogRow>(SQL_LIST_RECENT_FOR_USER)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
}
