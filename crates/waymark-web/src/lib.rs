//! HTTP API serving waymark roadmaps to browser front ends.
//!
//! `waymark-web` wraps a shared [`RoadmapResolver`] in an axum server. A
//! front end fetches the questionnaire, posts the four answers, and renders
//! the returned dual-tier roadmap.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use waymark_rs::prelude::*;
//! use waymark_web::{WebConfig, spawn_web};
//!
//! let resolver = RoadmapConfig::from_env().build_resolver(&Credential::from_env())?;
//! let addr = spawn_web(Arc::new(resolver), WebConfig::default()).await?;
//! println!("API: http://{addr}/api/questions");
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | GET | `/api/questions` | Questions with their options |
//! | POST | `/api/roadmap` | `{ roadmap, profile, source, fallback }` |
//! | GET | `/api/blueprints/{focus}` | The local blueprint for a focus label |

mod api;
mod server;

pub use api::{BlueprintResponse, RoadmapResponse};
pub use server::build_router;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use waymark_rs::resolver::RoadmapResolver;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory with a static front-end build. If `None`, only the API is
    /// served.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(resolver: Arc<RoadmapResolver>, config: WebConfig) -> io::Result<SocketAddr> {
    let router = server::build_router(resolver, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
