use axum::{
    middleware,
    routing::{get, get_service, post},
    Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use aidora::web::middleware::auth as auth_middleware;
use aidora::web::routes::{admin, auth, home, location, provider, providers, settings};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Connect to the database
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");
    println!("Connecting to database: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Cannot connect to DB");

    // 3. Protected routes under one middleware layer
    let protected_routes = Router::new()
        .route("/services", get(providers::providers_handler))
        .route("/provider/:provider_id", get(provider::provider_detail_handler))
        .route(
            "/provider/:provider_id/book",
            post(provider::booking_command_handler),
        )
        .route("/settings", get(settings::settings_handler))
        .route("/settings/profile", post(settings::save_profile_handler))
        .route(
            "/settings/preferences",
            post(settings::save_preferences_handler),
        )
        .route("/settings/privacy", post(settings::save_privacy_handler))
        .route(
            "/api/location",
            post(location::cache_location_handler).delete(location::clear_location_handler),
        )
        .route("/api/location/search", get(location::search_places))
        .route("/logout", post(auth::logout_handler))
        .layer(middleware::from_fn_with_state(
            pool.clone(),
            auth_middleware::require_auth,
        ));

    // 4. Admin routes behind the password-gate cookie
    let admin_routes = Router::new()
        .route("/admin/dashboard", get(admin::admin_dashboard_handler))
        .route(
            "/admin/providers/:provider_id/verify",
            post(admin::verify_provider_handler),
        )
        .route(
            "/admin/reviews/:review_id/remove",
            post(admin::remove_review_handler),
        )
        .route("/admin/logout", post(admin::admin_logout_handler))
        .layer(middleware::from_fn(auth_middleware::require_admin));

    // 5. Assemble the application
    let app = Router::new()
        // Public routes
        .route("/", get(home::home_handler))
        .route("/login", get(auth::login_page).post(auth::login_handler))
        .route(
            "/admin",
            get(admin::admin_login_page).post(admin::admin_login_handler),
        )
        // Protected routes
        .merge(protected_routes)
        .merge(admin_routes)
        // Static files
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        // Layers
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool);

    // 6. Start the server (with fallback port)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Could not bind on {}: {}. Trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Cannot parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Cannot bind on fallback port")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Server running at http://{}", bound_addr);
    println!("📍 Open http://{}/services to browse providers", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
