use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use platform_server::cache::{CachedTfnswClient, TripCacheConfig};
use platform_server::refresh::{REFRESH_INTERVAL, RefreshTimer};
use platform_server::settings::Settings;
use platform_server::tfnsw::{TfnswClient, TfnswConfig};
use platform_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Get credentials from environment
    let api_key = std::env::var("TFNSW_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: TFNSW_API_KEY not set. API calls will fail.");
        String::new()
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

    // Route defaults, shared with the browser client's storage key
    let settings_path = std::env::var("SETTINGS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Settings::default_path());
    let settings = Settings::load(&settings_path);

    // Create the trip planner client with caching
    let tfnsw_config = TfnswConfig::new(&api_key);
    let tfnsw = TfnswClient::new(tfnsw_config).expect("Failed to create TfNSW client");
    let cached_tfnsw = CachedTfnswClient::new(tfnsw, &TripCacheConfig::default());

    // Build app state
    let state = AppState::new(cached_tfnsw, settings);

    // Keep the default route warm in the cache at the browser poll interval
    let warmup_client = state.tfnsw.clone();
    let warmup_settings = state.settings.clone();
    let warmup = RefreshTimer::new();
    warmup.restart(REFRESH_INTERVAL, move || {
        let client = warmup_client.clone();
        let settings = warmup_settings.clone();
        async move {
            let result = client
                .plan_trip(&settings.origin.id, &settings.dest.id, 10, Utc::now())
                .await;
            if let Err(e) = result {
                tracing::warn!("warm-up trip fetch failed: {e}");
            }
        }
    });

    // Create router
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Which Platform? listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health          - Health check");
    println!("  GET /api/departures  - Departure board (origin, destination, count)");
    println!("  GET /api/stops       - Station search (q)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
