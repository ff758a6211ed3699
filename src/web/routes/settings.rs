use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::settings_service::{
    self, PreferencesForm, PrivacyForm, ProfileForm, SettingsPageData,
};
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub settings: SettingsPageData,
}

#[derive(Debug, Deserialize, Default)]
pub struct SettingsQuery {
    pub notice: Option<String>,
}

pub async fn settings_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<SettingsQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let settings =
        match settings_service::build_settings_page(&pool, &auth_user.id, query.notice).await {
            Ok(s) => s,
            Err(e) => {
                warn!("Settings load failed for {}: {}", auth_user.id, e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

    let template = SettingsTemplate { settings };
    Html(template.render().unwrap()).into_response()
}

pub async fn save_profile_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Form(form): Form<ProfileForm>,
) -> impl IntoResponse {
    let notice = match settings_service::save_profile(&pool, &auth_user.id, &form).await {
        Ok(()) => "profile_saved",
        Err(e) => {
            warn!("Profile save failed for {}: {}", auth_user.id, e);
            "error"
        }
    };
    Redirect::to(&format!("/settings?notice={}", notice))
}

pub async fn save_preferences_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Form(form): Form<PreferencesForm>,
) -> impl IntoResponse {
    let notice = match settings_service::save_preferences(&pool, &auth_user.id, &form).await {
        Ok(()) => "preferences_saved",
        Err(e) => {
            warn!("Preferences save failed for {}: {}", auth_user.id, e);
            "error"
        }
    };
    Redirect::to(&format!("/settings?notice={}", notice))
}

pub async fn save_privacy_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Form(form): Form<PrivacyForm>,
) -> impl IntoResponse {
    let notice = match settings_service::save_privacy(&pool, &auth_user.id, &form).await {
        Ok(()) => "privacy_saved",
        Err(e) => {
            warn!("Privacy save failed for {}: {}", auth_user.id, e);
            "error"
        }
    };
    Redirect::to(&format!("/settings?notice={}", notice))
}
