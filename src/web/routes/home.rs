use askama::Template;
use axum::{extract::State, response::Html};
use sqlx::SqlitePool;

use crate::database::provider_repo;
use crate::services::providers_service::{self, ProviderCardView, CATEGORIES};

pub struct CategoryTileView {
    pub name: String,
    pub provider_count: i64,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProviderCardView>,
    pub categories: Vec<CategoryTileView>,
}

pub async fn home_handler(State(pool): State<SqlitePool>) -> Html<String> {
    let featured = provider_repo::list_featured(&pool, 3)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(providers_service::provider_card)
        .collect();

    let counts = provider_repo::count_by_category(&pool).await.unwrap_or_default();
    let categories = CATEGORIES
        .iter()
        .map(|name| CategoryTileView {
            name: name.to_string(),
            provider_count: counts
                .iter()
                .find(|(category, _)| category == name)
                .map(|(_, count)| *count)
                .unwrap_or(0),
        })
        .collect();

    let template = HomeTemplate {
        featured,
        categories,
    };
    Html(template.render().unwrap())
}
