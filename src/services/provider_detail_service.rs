use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::database::{activity_log_repo, booking_repo, provider_repo, review_repo};
use crate::database::activity_log_repo::NewActivityLog;
use crate::database::booking_repo::NewBooking;

pub struct ReviewView {
    pub author_name: String,
    pub stars_label: String,
    pub body: String,
    pub date_label: String,
}

pub struct ProviderDetailView {
    pub provider_id: String,
    pub name: String,
    pub category: String,
    pub specialty: String,
    pub rating_label: String,
    pub review_count: i64,
    pub location_label: String,
    pub is_verified: bool,
    pub image_url: String,
    pub reviews: Vec<ReviewView>,
}

pub async fn load_provider_detail_view(
    pool: &SqlitePool,
    provider_id: &str,
) -> sqlx::Result<Option<ProviderDetailView>> {
    let Some(row) = provider_repo::load_provider(pool, provider_id).await? else {
        return Ok(None);
    };

    let reviews = review_repo::list_for_provider(pool, provider_id, 20)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| ReviewView {
            author_name: r.author_name,
            stars_label: stars_label(r.rating),
            body: r.body,
            date_label: format_date_label(&r.created_at),
        })
        .collect();

    Ok(Some(ProviderDetailView {
        provider_id: row.provider_id,
        name: row.name,
        category: row.category,
        specialty: row.specialty,
        rating_label: format!("{:.1}", row.rating),
        review_count: row.review_count,
        location_label: row.location.unwrap_or_default(),
        is_verified: row.is_verified.unwrap_or(0) == 1,
        image_url: row.image_url.unwrap_or_default(),
        reviews,
    }))
}

pub struct BookingRequest<'a> {
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub message: &'a str,
}

/// Inserts a pending booking for an existing provider. Returns false when
/// the provider does not exist; the activity log write is best effort.
pub async fn create_booking(
    pool: &SqlitePool,
    auth_user_id: &str,
    provider_id: &str,
    request: BookingRequest<'_>,
) -> sqlx::Result<bool> {
    if provider_repo::load_provider(pool, provider_id).await?.is_none() {
        return Ok(false);
    }

    let booking_id = Uuid::new_v4().to_string();
    booking_repo::insert_booking(
        pool,
        NewBooking {
            booking_id: &booking_id,
            provider_id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            message: request.message,
        },
    )
    .await?;

    let details = serde_json::json!({ "provider_id": provider_id, "booking_id": booking_id });
    let log_id = Uuid::new_v4().to_string();
    if let Err(e) = activity_log_repo::insert_log(
        pool,
        NewActivityLog {
            log_id: &log_id,
            user_id: auth_user_id,
            action_type: "booking_requested",
            details: Some(&details.to_string()),
        },
    )
    .await
    {
        warn!("Activity log write failed for booking {}: {}", booking_id, e);
    }

    Ok(true)
}

fn stars_label(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

// Expected shape: "2025-10-17T10:06:13" or "2025-10-17 10:06:13".
fn format_date_label(created_at: &str) -> String {
    created_at.get(0..10).unwrap_or(created_at).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_label_fills_and_pads() {
        assert_eq!(stars_label(5), "★★★★★");
        assert_eq!(stars_label(3), "★★★☆☆");
        assert_eq!(stars_label(0), "☆☆☆☆☆");
        assert_eq!(stars_label(9), "★★★★★");
    }

    #[test]
    fn date_label_keeps_the_day_part() {
        assert_eq!(format_date_label("2025-10-17T10:06:13"), "2025-10-17");
        assert_eq!(format_date_label("bad"), "bad");
    }
}
