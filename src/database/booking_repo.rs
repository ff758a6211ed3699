use sqlx::SqlitePool;

use crate::models::BookingRow;

const SQL_INSERT_BOOKING: &str = r#"
INSERT INTO bookings (
  booking_id,
  provider_id,
  customer_name,
  customer_email,
  message,
  status
) VALUES (?, ?, ?, ?, ?, 'pending')
"#;

const SQL_LIST_RECENT: &str = r#"
SELECT booking_id, provider_id, customer_name, customer_email, message, status, created_at
FROM bookings
ORDER BY created_at DESC
LIMIT ?1
"#;

pub struct NewBooking<'a> {
    pub booking_id: &'a str,
    pub provider_id: &'a str,
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub message: &'a str,
}

pub async fn insert_booking(pool: &SqlitePool, booking: NewBooking<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_BOOKING)
        .bind(booking.booking_id)
        .bind(booking.provider_id)
        .bind(booking.customer_name)
        .bind(booking.customer_email)
        .bind(booking.message)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn list_recent(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(SQL_LIST_RECENT)
        .bind(limit)
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn inserted_booking_comes_back_pending() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
CREATE TABLE bookings (
    booking_id TEXT PRIMARY KEY,
    provider_id TEXT NOT NULL,
    customer_name TEXT NOT NULL,
    customer_email TEXT NOT NULL,
    message TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let inserted = insert_booking(
            &pool,
            NewBooking {
                booking_id: "b1",
                provider_id: "p1",
                customer_name: "Fatima K.",
                customer_email: "fatima@example.tn",
                message: "Need a checkup this week",
            },
        )
        .await
        .unwrap();
        assert_eq!(inserted, 1);

        let recent = list_recent(&pool, 5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].booking_id, "b1");
        assert_eq!(recent[0].status, "pending");
    }
}
