pub mod core;

use std::sync::Arc;

use axum::extract::State;
use axum::Router;

use crate::core::config::{AppConfig, ConfigError};
use crate::core::feed::fetcher::fetch_feed;
use crate::core::feed::mapper::build_feed;
use crate::core::feed::parser::parse_rss_bytes;
use crate::core::feed::types::Channel;
use crate::core::logging::{init_tracing, Logger, Severity, TracingLogger};
use crate::core::response::{FailureKind, FeedResponse};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-process collaborators handed to every request. Nothing in here is
/// mutated by a request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    client: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl AppState {
    pub fn new(config: AppConfig, client: reqwest::Client, logger: Arc<dyn Logger>) -> Self {
        Self {
            config: Arc::new(config),
            client,
            logger,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Fetches the configured feed once and converts it.
pub async fn convert_feed(state: &AppState) -> FeedResponse {
    let feed_url = state.config.feed_url.as_str();

    let body = match fetch_feed(&state.client, feed_url).await {
        Ok(body) => body,
        Err(error) => {
            let kind = FailureKind::from(&error);
            report_failure(state, kind, &error);
            return FeedResponse::Failed(kind);
        }
    };

    match parse_rss_bytes(&body) {
        Ok(rss) => FeedResponse::Converted(build_feed(feed_url, &rss.channel)),
        Err(error) => {
            report_failure(state, FailureKind::Decode, &error);
            // The error object has been committed; the feed still gets encoded
            // after it, from an empty channel.
            FeedResponse::FailedThenConverted(
                FailureKind::Decode,
                build_feed(feed_url, &Channel::default()),
            )
        }
    }
}

fn report_failure(state: &AppState, kind: FailureKind, error: &dyn std::error::Error) {
    state.logger.log(
        Severity::Error,
        &format!(
            "{}: {} (feed {})",
            kind.log_context(),
            error,
            state.config.feed_url
        ),
    );
}

async fn handle_feed(State(state): State<AppState>) -> FeedResponse {
    convert_feed(&state).await
}

/// Every method and path reaches the feed handler.
pub fn create_router(state: AppState) -> Router {
    Router::new().fallback(handle_feed).with_state(state)
}

pub async fn run() -> Result<(), RunError> {
    init_tracing();
    let config = AppConfig::from_env()?;
    let client = reqwest::Client::builder()
        .timeout(config.fetch_timeout)
        .build()?;
    let addr = config.bind_addr;
    tracing::info!("Serving {} as JSON on {}", config.feed_url, addr);

    let state = AppState::new(config, client, Arc::new(TracingLogger));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", error);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
