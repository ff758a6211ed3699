#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub review_id: String,
    pub provider_id: String,
    pub author_name: String,
    pub rating: i64,
    pub body: String,
    pub created_at: String,
}
