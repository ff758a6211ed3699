use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::{booking_repo, provider_repo, review_repo, stats_repo};

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    pub tab: Option<String>, // providers|bookings|reviews
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Providers,
    Bookings,
    Reviews,
}

impl DashboardTab {
    pub fn as_str(self) -> &'static str {
        match self {
            DashboardTab::Providers => "providers",
            DashboardTab::Bookings => "bookings",
            DashboardTab::Reviews => "reviews",
        }
    }
}

pub fn parse_tab(input: Option<&str>) -> DashboardTab {
    match input.unwrap_or("providers") {
        "bookings" => DashboardTab::Bookings,
        "reviews" => DashboardTab::Reviews,
        _ => DashboardTab::Providers,
    }
}

/// The original gate is a static compare; kept that way on purpose, with
/// the expected value coming from the environment instead of source.
pub fn password_matches(submitted: &str, expected: &str) -> bool {
    !expected.is_empty() && submitted == expected
}

pub struct DashboardStats {
    pub provider_count: i64,
    pub booking_count: i64,
    pub average_rating_label: String,
    pub active_user_count: i64,
}

pub struct AdminProviderView {
    pub provider_id: String,
    pub name: String,
    pub category: String,
    pub is_verified: bool,
}

pub struct AdminBookingView {
    pub booking_id: String,
    pub provider_id: String,
    pub customer_name: String,
    pub status: String,
    pub date_label: String,
}

pub struct AdminReviewView {
    pub review_id: String,
    pub provider_id: String,
    pub author_name: String,
    pub rating: i64,
    pub body: String,
}

pub struct AdminDashboardData {
    pub tab: DashboardTab,
    pub stats: DashboardStats,
    pub recent_providers: Vec<AdminProviderView>,
    pub recent_bookings: Vec<AdminBookingView>,
    pub recent_reviews: Vec<AdminReviewView>,
    pub notice: String,
}

pub async fn build_dashboard_page(
    pool: &SqlitePool,
    query: &DashboardQuery,
) -> sqlx::Result<AdminDashboardData> {
    let provider_count = stats_repo::count_providers(pool).await?;
    let booking_count = stats_repo::count_bookings(pool).await.unwrap_or(0);
    let average_rating = stats_repo::average_provider_rating(pool).await.unwrap_or(None);
    let active_user_count = stats_repo::count_active_users(pool).await.unwrap_or(0);

    let recent_providers = provider_repo::list_recent(pool, 5)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|p| AdminProviderView {
            provider_id: p.provider_id,
            name: p.name,
            category: p.category,
            is_verified: p.is_verified.unwrap_or(0) == 1,
        })
        .collect();

    let recent_bookings = booking_repo::list_recent(pool, 5)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|b| AdminBookingView {
            booking_id: b.booking_id,
            provider_id: b.provider_id,
            customer_name: b.customer_name,
            status: b.status,
            date_label: b.created_at.get(0..10).unwrap_or(&b.created_at).to_string(),
        })
        .collect();

    let recent_reviews = review_repo::list_recent(pool, 5)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| AdminReviewView {
            review_id: r.review_id,
            provider_id: r.provider_id,
            author_name: r.author_name,
            rating: r.rating,
            body: r.body,
        })
        .collect();

    Ok(AdminDashboardData {
        tab: parse_tab(query.tab.as_deref()),
        stats: DashboardStats {
            provider_count,
            booking_count,
            average_rating_label: average_rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "n/a".to_string()),
            active_user_count,
        },
        recent_providers,
        recent_bookings,
        recent_reviews,
        notice: query.notice.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_parsing_defaults_to_providers() {
        assert_eq!(parse_tab(None), DashboardTab::Providers);
        assert_eq!(parse_tab(Some("bookings")), DashboardTab::Bookings);
        assert_eq!(parse_tab(Some("reviews")), DashboardTab::Reviews);
        assert_eq!(parse_tab(Some("nonsense")), DashboardTab::Providers);
    }

    #[test]
    fn empty_expected_password_never_matches() {
        assert!(!password_matches("", ""));
        assert!(!password_matches("anything", ""));
        assert!(password_matches("s3cret", "s3cret"));
        assert!(!password_matches("S3CRET", "s3cret"));
    }
}
