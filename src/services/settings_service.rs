use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::database::activity_log_repo::{self, NewActivityLog};
use crate::database::profile_repo::{self, PreferencesUpdate, ProfileInfoUpdate};

#[derive(Clone)]
pub struct SelectOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct ActivityLogView {
    pub action_label: String,
    pub date_label: String,
}

pub struct SettingsPageData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub picture_url: String,
    pub language_options: Vec<SelectOptionView>,
    pub timezone_options: Vec<SelectOptionView>,
    pub theme_options: Vec<SelectOptionView>,
    pub privacy_options: Vec<SelectOptionView>,
    pub notify_email: bool,
    pub notify_push: bool,
    pub notify_sms: bool,
    pub activity: Vec<ActivityLogView>,
    pub notice: String,
}

const LANGUAGES: [(&str, &str); 4] = [
    ("en", "English"),
    ("ar", "العربية (Arabic)"),
    ("fr", "Français (French)"),
    ("es", "Español (Spanish)"),
];

const TIMEZONES: [(&str, &str); 6] = [
    ("UTC", "UTC"),
    ("Africa/Tunis", "Tunis"),
    ("Europe/Paris", "Paris"),
    ("Europe/London", "London"),
    ("America/New_York", "Eastern Time"),
    ("Asia/Dubai", "Dubai"),
];

const THEMES: [(&str, &str); 3] = [
    ("light", "Light"),
    ("dark", "Dark"),
    ("system", "System"),
];

const PRIVACY_LEVELS: [(&str, &str); 3] = [
    ("public", "Public - Everyone can see"),
    ("standard", "Standard - Registered users"),
    ("private", "Private - Only me"),
];

pub async fn build_settings_page(
    pool: &SqlitePool,
    auth_user_id: &str,
    notice: Option<String>,
) -> sqlx::Result<SettingsPageData> {
    let profile = profile_repo::load_profile(pool, auth_user_id).await?;

    let language = profile
        .as_ref()
        .and_then(|p| p.language.clone())
        .unwrap_or_else(|| "en".to_string());
    let timezone = profile
        .as_ref()
        .and_then(|p| p.timezone.clone())
        .unwrap_or_else(|| "UTC".to_string());
    let theme = profile
        .as_ref()
        .and_then(|p| p.theme.clone())
        .unwrap_or_else(|| "system".to_string());
    let privacy = profile
        .as_ref()
        .and_then(|p| p.privacy_level.clone())
        .unwrap_or_else(|| "standard".to_string());

    let activity = activity_log_repo::list_recent_for_user(pool, auth_user_id, 10)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|log| ActivityLogView {
            action_label: log.action_type.replace('_', " ").to_uppercase(),
            date_label: log.created_at.chars().take(16).collect::<String>().replace('T', " "),
        })
        .collect();

    Ok(SettingsPageData {
        full_name: field(&profile, |p| p.full_name.clone()),
        email: field(&profile, |p| p.email.clone()),
        phone: field(&profile, |p| p.phone.clone()),
        bio: field(&profile, |p| p.bio.clone()),
        picture_url: field(&profile, |p| p.picture_url.clone()),
        language_options: options(&LANGUAGES, &language),
        timezone_options: options(&TIMEZONES, &timezone),
        theme_options: options(&THEMES, &theme),
        privacy_options: options(&PRIVACY_LEVELS, &privacy),
        notify_email: flag(&profile, |p| p.notify_email, true),
        notify_push: flag(&profile, |p| p.notify_push, true),
        notify_sms: flag(&profile, |p| p.notify_sms, false),
        activity,
        notice: notice.unwrap_or_default(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub picture_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesForm {
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub theme: Option<String>,
    // Checkboxes arrive as "on" or not at all.
    pub notify_email: Option<String>,
    pub notify_push: Option<String>,
    pub notify_sms: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PrivacyForm {
    pub privacy_level: Option<String>,
}

pub async fn save_profile(
    pool: &SqlitePool,
    auth_user_id: &str,
    form: &ProfileForm,
) -> sqlx::Result<()> {
    profile_repo::upsert_profile_info(
        pool,
        auth_user_id,
        ProfileInfoUpdate {
            full_name: form.full_name.as_deref().unwrap_or("").trim(),
            phone: form.phone.as_deref().unwrap_or("").trim(),
            bio: form.bio.as_deref().unwrap_or("").trim(),
            picture_url: form.picture_url.as_deref().unwrap_or("").trim(),
        },
    )
    .await?;

    log_settings_change(pool, auth_user_id, "profile_updated").await;
    Ok(())
}

pub async fn save_preferences(
    pool: &SqlitePool,
    auth_user_id: &str,
    form: &PreferencesForm,
) -> sqlx::Result<()> {
    profile_repo::upsert_preferences(
        pool,
        auth_user_id,
        PreferencesUpdate {
            language: normalize(&LANGUAGES, form.language.as_deref(), "en"),
            timezone: normalize(&TIMEZONES, form.timezone.as_deref(), "UTC"),
            theme: normalize(&THEMES, form.theme.as_deref(), "system"),
            notify_email: form.notify_email.is_some(),
            notify_push: form.notify_push.is_some(),
            notify_sms: form.notify_sms.is_some(),
        },
    )
    .await?;

    log_settings_change(pool, auth_user_id, "preferences_updated").await;
    Ok(())
}

pub async fn save_privacy(
    pool: &SqlitePool,
    auth_user_id: &str,
    form: &PrivacyForm,
) -> sqlx::Result<()> {
    profile_repo::upsert_privacy(
        pool,
        auth_user_id,
        normalize(&PRIVACY_LEVELS, form.privacy_level.as_deref(), "standard"),
    )
    .await?;

    log_settings_change(pool, auth_user_id, "privacy_updated").await;
    Ok(())
}

async fn log_settings_change(pool: &SqlitePool, user_id: &str, action_type: &str) {
    let log_id = Uuid::new_v4().to_string();
    if let Err(e) = activity_log_repo::insert_log(
        pool,
        NewActivityLog {
            log_id: &log_id,
            user_id,
            action_type,
            details: None,
        },
    )
    .await
    {
        warn!("Activity log write failed ({}): {}", action_type, e);
    }
}

fn field(
    profile: &Option<crate::models::ProfileRow>,
    pick: impl Fn(&crate::models::ProfileRow) -> Option<String>,
) -> String {
    profile.as_ref().and_then(pick).unwrap_or_default()
}

fn flag(
    profile: &Option<crate::models::ProfileRow>,
    pick: impl Fn(&crate::models::ProfileRow) -> Option<i64>,
    default: bool,
) -> bool {
    profile
        .as_ref()
        .and_then(pick)
        .map(|v| v == 1)
        .unwrap_or(default)
}

fn options(known: &[(&str, &str)], current: &str) -> Vec<SelectOptionView> {
    known
        .iter()
        .map(|(value, label)| SelectOptionView {
            value: value.to_string(),
            label: label.to_string(),
            selected: *value == current,
        })
        .collect()
}

fn normalize<'a>(known: &[(&'a str, &str)], submitted: Option<&str>, default: &'a str) -> &'a str {
    let Some(submitted) = submitted else {
        return default;
    };
    known
        .iter()
        .find(|(value, _)| *value == submitted)
        .map(|(value, _)| *value)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_select_values_fall_back_to_defaults() {
        assert_eq!(normalize(&THEMES, Some("dark"), "system"), "dark");
        assert_eq!(normalize(&THEMES, Some("neon"), "system"), "system");
        assert_eq!(normalize(&THEMES, None, "system"), "system");
    }

    #[test]
    fn option_views_mark_the_current_value() {
        let opts = options(&THEMES, "dark");
        let selected: Vec<&str> = opts
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, vec!["dark"]);
    }
}
