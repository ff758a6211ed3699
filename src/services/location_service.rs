use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize, Clone)]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct Geo {
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PlaceHit {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "_geo")]
    geo: Option<Geo>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Option<Vec<PlaceHit>>,
}

/// Place-name search against the upstream geocoder. Failures are reported
/// to the caller, who degrades to an empty result; nothing here is fatal.
pub async fn search_places_upstream(q: &str, limit: usize) -> Result<Vec<PlaceResult>, ()> {
    let q = q.trim();
    if q.len() < 2 {
        return Ok(Vec::new());
    }

    let limit = limit.clamp(1, 20);
    let base_url =
        std::env::var("GEOCODER_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let host_header =
        std::env::var("GEOCODER_SERVICE_HOST").unwrap_or_else(|_| "geocoder.localhost".to_string());
    let api_key = std::env::var("GEOCODER_API_KEY").ok();

    let url = format!("{}/search", base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let mut req = client
        .get(&url)
        .query(&[("q", q), ("limit", &limit.to_string())])
        .header("Host", host_header);

    if let Some(key) = api_key {
        req = req.header("x-api-key", key);
    }

    let resp = match req.send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("📍 Geocoder upstream unreachable: {}", e);
            return Err(());
        }
    };

    if !resp.status().is_success() {
        warn!("📍 Geocoder upstream non-OK: {}", resp.status());
        return Err(());
    }

    let parsed: SearchResponse = match resp.json().await {
        Ok(data) => data,
        Err(e) => {
            warn!("📍 Geocoder upstream JSON parse failed: {}", e);
            return Err(());
        }
    };

    Ok(map_hits(parsed.hits.unwrap_or_default()))
}

// Geocoder deployments disagree about coordinate field names; accept the
// common spellings and drop hits with no usable pair.
fn map_hits(hits: Vec<PlaceHit>) -> Vec<PlaceResult> {
    hits.into_iter()
        .filter_map(|hit| {
            let geo_lat = hit.geo.as_ref().and_then(|g| g.lat);
            let geo_lng = hit.geo.as_ref().and_then(|g| g.lng);
            let lat = geo_lat.or(hit.lat).or(hit.latitude)?;
            let lon = geo_lng.or(hit.lon).or(hit.longitude)?;

            Some(PlaceResult {
                id: hit.id.unwrap_or_default(),
                name: hit.name.unwrap_or_default(),
                description: hit.description.unwrap_or_default(),
                latitude: lat,
                longitude: lon,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_map_across_coordinate_spellings() {
        let raw = r#"{
            "hits": [
                {"id": "a", "name": "Tunis", "_geo": {"lat": 36.8, "lng": 10.18}},
                {"id": "b", "name": "Sousse", "lat": 35.82, "lon": 10.64},
                {"id": "c", "name": "Sfax", "latitude": 34.74, "longitude": 10.76},
                {"id": "d", "name": "No coords"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let results = map_hits(parsed.hits.unwrap());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "Tunis");
        assert_eq!(results[1].latitude, 35.82);
        assert_eq!(results[2].longitude, 10.76);
    }
}
