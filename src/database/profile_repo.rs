use sqlx::SqlitePool;

use crate::models::ProfileRow;

const SQL_LOAD_PROFILE: &str = r#"
SELECT
    user_id, full_name, email, phone, bio, picture_url,
    language, timezone, theme,
    notify_email, notify_push, notify_sms, privacy_level
FROM profiles
WHERE user_id = ?1
"#;

const SQL_UPSERT_PROFILE_INFO: &str = r#"
INSERT INTO profiles (user_id, full_name, phone, bio, picture_url)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(user_id) DO UPDATE SET
    full_name = excluded.full_name,
    phone = excluded.phone,
    bio = excluded.bio,
    picture_url = excluded.picture_url
"#;

const SQL_UPSERT_PREFERENCES: &str = r#"
INSERT INTO profiles (user_id, language, timezone, theme, notify_email, notify_push, notify_sms)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT(user_id) DO UPDATE SET
    language = excluded.language,
    timezone = excluded.timezone,
    theme = excluded.theme,
    notify_email = excluded.notify_email,
    notify_push = excluded.notify_push,
    notify_sms = excluded.notify_sms
"#;

const SQL_UPSERT_PRIVACY: &str = r#"
INSERT INTO profiles (user_id, privacy_level)
VALUES (?1, ?2)
ON CONFLICT(user_id) DO UPDATE SET
    privacy_level = excluded.privacy_level
"#;

pub struct ProfileInfoUpdate<'a> {
    pub full_name: &'a str,
    pub phone: &'a str,
    pub bio: &'a str,
    pub picture_url: &'a str,
}

pub struct PreferencesUpdate<'a> {
    pub language: &'a str,
    pub timezone: &'a str,
    pub theme: &'a str,
    pub notify_email: bool,
    pub notify_push: bool,
    pub notify_sms: bool,
}

pub async fn load_profile(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<ProfileRow>> {
    sqlx::query_as::<_, ProfileRow>(SQL_LOAD_PROFILE)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn upsert_profile_info(
    pool: &SqlitePool,
    user_id: &str,
    update: ProfileInfoUpdate<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPSERT_PROFILE_INFO)
        .bind(user_id)
        .bind(update.full_name)
        .bind(update.phone)
        .bind(update.bio)
        .bind(update.picture_url)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn upsert_preferences(
    pool: &SqlitePool,
    user_id: &str,
    update: PreferencesUpdate<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPSERT_PREFERENCES)
        .bind(user_id)
        .bind(update.language)
        .bind(update.timezone)
        .bind(update.theme)
        .bind(update.notify_email as i64)
        .bind(update.notify_push as i64)
        .bind(update.notify_sms as i64)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn upsert_privacy(
    pool: &SqlitePool,
    user_id: &str,
    privacy_level: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPSERT_PRIVACY)
        .bind(user_id)
        .bind(privacy_level)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
