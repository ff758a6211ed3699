//! Session-scoped state carried in cookies: the caller's cached coordinate
//! and the admin flag. Handlers parse a `CallerSession` from the request
//! headers and pass it down explicitly; nothing reads ambient globals.

use cookie::{Cookie, SameSite};
use http::{header, HeaderMap};

use crate::geo::Coordinate;

pub const LOCATION_COOKIE: &str = "caller_location";
pub const ADMIN_COOKIE: &str = "admin_session";

#[derive(Debug, Clone, Copy, Default)]
pub struct CallerSession {
    pub coordinate: Option<Coordinate>,
    pub is_admin: bool,
}

impl CallerSession {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(cookies) = headers.get(header::COOKIE).and_then(|hv| hv.to_str().ok()) else {
            return Self::default();
        };

        Self {
            coordinate: cookie_value(cookies, LOCATION_COOKIE).and_then(parse_location_value),
            is_admin: cookie_value(cookies, ADMIN_COOKIE).is_some_and(|v| !v.is_empty()),
        }
    }
}

pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split("; ")
        .find_map(|c| c.strip_prefix(name)?.strip_prefix('='))
        .filter(|v| !v.is_empty())
}

/// Cookie payload is `lat,lon`; anything that doesn't validate as a
/// coordinate reads as "no location".
pub fn parse_location_value(raw: &str) -> Option<Coordinate> {
    let (lat, lon) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Coordinate::new(lat, lon)
}

pub fn location_cookie(coordinate: Coordinate) -> Cookie<'static> {
    session_cookie(
        LOCATION_COOKIE,
        format!("{},{}", coordinate.latitude, coordinate.longitude),
    )
}

pub fn clear_location_cookie() -> Cookie<'static> {
    session_cookie(LOCATION_COOKIE, String::new())
}

pub fn admin_cookie() -> Cookie<'static> {
    session_cookie(ADMIN_COOKIE, "granted".to_string())
}

pub fn clear_admin_cookie() -> Cookie<'static> {
    session_cookie(ADMIN_COOKIE, String::new())
}

// Session cookie: no Max-Age, so it dies with the browsing session.
fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn location_value_round_trips() {
        let coord = Coordinate::new(36.8065, 10.1815).unwrap();
        let cookie = location_cookie(coord);
        assert_eq!(parse_location_value(cookie.value()), Some(coord));
    }

    #[test]
    fn malformed_location_values_read_as_absent() {
        assert!(parse_location_value("").is_none());
        assert!(parse_location_value("36.8").is_none());
        assert!(parse_location_value("abc,10.2").is_none());
        assert!(parse_location_value("999,10.2").is_none());
    }

    #[test]
    fn session_parses_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("caller_location=36.8065,10.1815; admin_session=granted"),
        );

        let session = CallerSession::from_headers(&headers);
        assert_eq!(session.coordinate, Coordinate::new(36.8065, 10.1815));
        assert!(session.is_admin);
    }

    #[test]
    fn empty_cookie_values_clear_the_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("caller_location=; admin_session="),
        );

        let session = CallerSession::from_headers(&headers);
        assert!(session.coordinate.is_none());
        assert!(!session.is_admin);
    }

    #[test]
    fn missing_header_yields_default_session() {
        let session = CallerSession::from_headers(&HeaderMap::new());
        assert!(session.coordinate.is_none());
        assert!(!session.is_admin);
    }
}
