use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::{provider_repo, review_repo};
use crate::services::admin_service::{self, DashboardQuery};
use crate::session;

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub notice: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct AdminLoginQuery {
    pub notice: Option<String>,
}

pub async fn admin_login_page(Query(query): Query<AdminLoginQuery>) -> Html<String> {
    let template = AdminLoginTemplate {
        notice: query.notice.unwrap_or_default(),
    };
    Html(template.render().unwrap())
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub password: String,
}

pub async fn admin_login_handler(Form(form): Form<AdminLoginForm>) -> Response {
    let expected = std::env::var("ADMIN_PASSWORD").unwrap_or_default();
    if expected.is_empty() {
        warn!("ADMIN_PASSWORD is not set; admin access stays closed");
    }

    if !admin_service::password_matches(&form.password, &expected) {
        return Redirect::to("/admin?notice=invalid_password").into_response();
    }

    let mut response = Redirect::to("/admin/dashboard").into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        session::admin_cookie().to_string().parse().unwrap(),
    );
    response
}

pub async fn admin_logout_handler() -> Response {
    let mut response = Redirect::to("/admin").into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        session::clear_admin_cookie().to_string().parse().unwrap(),
    );
    response
}

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub data: admin_service::AdminDashboardData,
}

pub async fn admin_dashboard_handler(
    Query(query): Query<DashboardQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let data = match admin_service::build_dashboard_page(&pool, &query).await {
        Ok(d) => d,
        Err(e) => {
            warn!("Admin dashboard load failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = AdminDashboardTemplate { data };
    Html(template.render().unwrap()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct VerifyProviderForm {
    pub verified: Option<String>, // "1" to verify, anything else clears
}

pub async fn verify_provider_handler(
    Path(provider_id): Path<String>,
    State(pool): State<SqlitePool>,
    Form(form): Form<VerifyProviderForm>,
) -> impl IntoResponse {
    let verified = form.verified.as_deref() == Some("1");

    let notice = match provider_repo::set_verified(&pool, &provider_id, verified).await {
        Ok(0) => "provider_missing",
        Ok(_) => {
            if verified {
                "provider_verified"
            } else {
                "provider_unverified"
            }
        }
        Err(e) => {
            warn!("Verify command failed for {}: {}", provider_id, e);
            "error"
        }
    };

    Redirect::to(&format!("/admin/dashboard?tab=providers&notice={}", notice))
}

pub async fn remove_review_handler(
    Path(review_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let notice = match review_repo::delete_review(&pool, &review_id).await {
        Ok(0) => "review_missing",
        Ok(_) => "review_removed",
        Err(e) => {
            warn!("Review removal failed for {}: {}", review_id, e);
            "error"
        }
    };

    Redirect::to(&format!("/admin/dashboard?tab=reviews&notice={}", notice))
}
