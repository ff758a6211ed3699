pub mod admin_service;
pub mod location_service;
pub mod provider_detail_service;
pub mod provider_geo_service;
pub mod providers_service;
pub mod settings_service;
