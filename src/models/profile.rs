// User settings row; every column is optional so a half-filled profile
// still loads.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub user_id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub picture_url: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub theme: Option<String>,
    pub notify_email: Option<i64>,
    pub notify_push: Option<i64>,
    pub notify_sms: Option<i64>,
    pub privacy_level: Option<String>,
}
