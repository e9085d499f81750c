use itinerary_server::config::ServerConfig;
use itinerary_server::planner::SearchPolicy;
use itinerary_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let policy = SearchPolicy::default();
    info!(
        max_hops = policy.max_hops,
        nearby_window_days = policy.nearby_window_days,
        max_results = policy.max_results,
        "default search policy"
    );

    let app = create_router(AppState::new(policy));

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(%addr, "itinerary server listening");
    info!("  GET  /health      - Health check");
    info!("  POST /api/search  - Plan a multi-leg journey");
    info!("  POST /api/slots   - Check a track slot");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
