#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: String,
    pub provider_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}
