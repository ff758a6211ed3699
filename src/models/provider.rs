// Provider listing row (distance is computed per request, never stored).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProviderRow {
    pub provider_id: String,
    pub name: String,
    pub category: String,
    pub specialty: String,
    pub rating: f64,
    pub review_count: i64,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_verified: Option<i64>,
    pub image_url: Option<String>,
    #[sqlx(skip)]
    pub distance_km: Option<f64>,
}

// Slim row for the geocoding backfill.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProviderGeoRow {
    pub provider_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
