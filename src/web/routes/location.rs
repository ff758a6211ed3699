use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::geo::Coordinate;
use crate::services::location_service;
use crate::session;

#[derive(Debug, Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}

// The browser acquires coordinates through the platform location API and
// posts them here once granted; from then on the session cookie carries
// them. A denied or failed acquisition simply never posts.
pub async fn cache_location_handler(Json(update): Json<LocationUpdate>) -> Response {
    let Some(coordinate) = Coordinate::new(update.latitude, update.longitude) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut response = StatusCode::NO_CONTENT.into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        session::location_cookie(coordinate).to_string().parse().unwrap(),
    );
    response
}

pub async fn clear_location_handler() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        session::clear_location_cookie().to_string().parse().unwrap(),
    );
    response
}

#[derive(Debug, Deserialize)]
pub struct PlaceSearchQuery {
    q: Option<String>,
    limit: Option<usize>,
}

pub async fn search_places(Query(query): Query<PlaceSearchQuery>) -> impl IntoResponse {
    let q = match query.q.as_ref().map(|s| s.trim()).filter(|s| s.len() >= 2) {
        Some(v) => v,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(Vec::<location_service::PlaceResult>::new()),
            )
        }
    };

    let limit = query.limit.unwrap_or(8).min(20);
    match location_service::search_places_upstream(q, limit).await {
        Ok(results) => (StatusCode::OK, Json(results)),
        Err(_) => (
            StatusCode::BAD_GATEWAY,
            Json(Vec::<location_service::PlaceResult>::new()),
        ),
    }
}
