use axum::{
    routing::{get, post},
    Router,
};
use examsphere_backend::{
    config::{get_config, init_config},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new();

    let api = Router::new()
        .route("/api/generate", post(routes::generate::generate_exam))
        .route("/api/stats", get(routes::stats::get_stats))
        .route("/api/track-visit", post(routes::stats::track_visit))
        .route("/api/track-event", post(routes::stats::track_event))
        .layer(axum::middleware::from_fn_with_state(
            examsphere_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            examsphere_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
