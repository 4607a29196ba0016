//! Parley - minimal chat relay API
//!
//! Accepts chat requests from browser clients, accumulates per-session
//! conversation history server-side, and forwards each turn to an
//! OpenAI-compatible chat completion provider.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod conversation;
mod gate;
mod providers;
mod relay;
mod routes;

use config::Config;
use relay::RelayEngine;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub relay: Arc<RelayEngine>,
}

fn app(state: AppState) -> Router {
    let cors = gate::layer(&state.config);

    Router::new()
        .merge(routes::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; upstream calls will be unauthenticated");
    }

    let relay = Arc::new(RelayEngine::new(&config));
    let state = AppState { config, relay };

    tracing::info!("💬 Parley relay running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
