use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::current_user_repo;
use crate::session;

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
}

pub async fn require_auth(
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user_id) = user_id_from_cookies(&request) {
        request.extensions_mut().insert(AuthenticatedUser { id: user_id });
        return next.run(request).await;
    }

    // Fallback for offline/local usage: use the current_user table.
    if let Ok(Some(user_id)) = current_user_repo::load_current_user_id(&pool).await {
        request.extensions_mut().insert(AuthenticatedUser { id: user_id });
        return next.run(request).await;
    }

    Redirect::to("/login").into_response()
}

// The auth service issues the JWT; we only read the payload's subject here,
// signature checks happen upstream.
fn user_id_from_cookies(request: &Request) -> Option<String> {
    let cookies = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())?;
    let token = session::cookie_value(cookies, "access_token")?;

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: JwtPayload = serde_json::from_slice(&payload_bytes).ok()?;
    Some(payload.sub)
}

pub async fn require_admin(request: Request, next: Next) -> Response {
    let admin = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| session::cookie_value(cookies, session::ADMIN_COOKIE))
        .is_some();

    if admin {
        return next.run(request).await;
    }

    Redirect::to("/admin").into_response()
}
