//! Axum server setup and router construction.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;
use waymark_rs::resolver::RoadmapResolver;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - REST API at `/api/*`
/// - Optional static files for a front-end build
pub fn build_router(resolver: Arc<RoadmapResolver>, static_dir: Option<PathBuf>) -> Router {
    let app_state = AppState { resolver };

    // Front ends in development run on another port.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/questions", get(api::get_questions))
        .route("/api/roadmap", post(api::post_roadmap))
        .route("/api/blueprints/{focus}", get(api::get_blueprint))
        .with_state(app_state)
        .layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Bind, start serving on a background task, and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("web server stopped: {e}");
        }
    });

    Ok(addr)
}
