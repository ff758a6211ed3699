#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityLogRow {
    pub log_id: String,
    pub user_id: String,
    pub action_type: String,
    pub details: Option<String>,
    pub created_at: String,
}
