//! TempStick dashboard service.
//!
//! Run with: `cargo run -p tempstick-service`

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use tempstick_core::Gateway;
use tempstick_service::{AppState, api};

/// TempStick dashboard - HTTP API proxy and static dashboard host.
#[derive(Parser, Debug)]
#[command(name = "tempstick-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Bind address.
    #[arg(short, long, env = "TEMPSTICK_BIND", default_value = "127.0.0.1:8787")]
    bind: String,

    /// Directory of static dashboard assets to serve at `/`.
    #[arg(short, long, env = "TEMPSTICK_ASSETS")]
    assets: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tempstick_service=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // A missing API key is fatal at startup, never on the first request.
    let gateway = Gateway::from_env()?;
    let state = AppState::new(gateway);

    let mut app = Router::new().merge(api::router()).with_state(state);

    if let Some(assets) = &args.assets {
        info!("Serving dashboard assets from {:?}", assets);
        let index = ServeFile::new(assets.join("index.html"));
        app = app.fallback_service(ServeDir::new(assets).fallback(index));
    }

    let app = app.layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr: SocketAddr = args.bind.parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
