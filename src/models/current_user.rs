// Local-dev fallback identity, see web::middleware::auth.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrentUserRow {
    pub user_id: String,
}
