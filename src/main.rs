use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use alcove::api;
use alcove::app_state::AppState;
use alcove::config::Config;
use alcove::tags::TagTaxonomy;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("alcove=info,tower_http=info")
                }),
        )
        .init();

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;

    let taxonomy = match config.taxonomy_path() {
        Some(path) => TagTaxonomy::from_file(path)
            .with_context(|| format!("failed to load taxonomy from {}", path.display()))?,
        None => TagTaxonomy::builtin(),
    };

    let state = AppState::new(taxonomy, config.scrape_cache_ttl_secs());

    let app = api::router(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id()),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!("listening on {}", config.bind_addr());
    axum::serve(listener, app).await?;
    Ok(())
}
