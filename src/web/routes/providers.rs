use askama::Template;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
    Extension,
};
use sqlx::SqlitePool;

use crate::services::providers_service::{self, ProvidersQuery};
use crate::session::CallerSession;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Template)]
#[template(path = "providers.html")]
pub struct ProvidersTemplate {
    pub providers: Vec<providers_service::ProviderCardView>,
    pub filters: providers_service::AppliedProviderFilters,
    pub category_options: Vec<providers_service::CategoryOptionView>,
}

pub async fn providers_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<ProvidersQuery>,
    State(pool): State<SqlitePool>,
    headers: HeaderMap,
) -> Html<String> {
    let session = CallerSession::from_headers(&headers);

    let data = providers_service::build_providers_page(&pool, &session, &query)
        .await
        .unwrap_or(providers_service::ProvidersPageData {
            providers: vec![],
            filters: providers_service::AppliedProviderFilters {
                category_value: "all".to_string(),
                sort_value: "rating".to_string(),
                ..providers_service::AppliedProviderFilters::default()
            },
            category_options: vec![],
        });

    let template = ProvidersTemplate {
        providers: data.providers,
        filters: data.filters,
        category_options: data.category_options,
    };
    Html(template.render().unwrap())
}
