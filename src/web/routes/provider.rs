use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::provider_detail_service::{self, BookingRequest};
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Template)]
#[template(path = "provider_detail.html")]
pub struct ProviderDetailTemplate {
    pub provider: provider_detail_service::ProviderDetailView,
    pub notice: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ProviderDetailQuery {
    pub notice: Option<String>,
}

pub async fn provider_detail_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(provider_id): Path<String>,
    Query(query): Query<ProviderDetailQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let view = match provider_detail_service::load_provider_detail_view(&pool, &provider_id).await
    {
        Ok(v) => v,
        Err(e) => {
            warn!("Provider detail load failed for {}: {}", provider_id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(view) = view else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let template = ProviderDetailTemplate {
        provider: view,
        notice: query.notice.unwrap_or_default(),
    };
    Html(template.render().unwrap()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub customer_name: String,
    pub customer_email: String,
    pub message: String,
}

pub async fn booking_command_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(provider_id): Path<String>,
    State(pool): State<SqlitePool>,
    Form(form): Form<BookingForm>,
) -> impl IntoResponse {
    if form.customer_name.trim().is_empty() || form.customer_email.trim().is_empty() {
        return Redirect::to(&format!("/provider/{}?notice=booking_invalid", provider_id))
            .into_response();
    }

    let notice = match provider_detail_service::create_booking(
        &pool,
        &auth_user.id,
        &provider_id,
        BookingRequest {
            customer_name: form.customer_name.trim(),
            customer_email: form.customer_email.trim(),
            message: form.message.trim(),
        },
    )
    .await
    {
        Ok(true) => "booking_ok",
        Ok(false) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Booking command failed for {}: {}", provider_id, e);
            "booking_error"
        }
    };

    Redirect::to(&format!("/provider/{}?notice={}", provider_id, notice)).into_response()
}
