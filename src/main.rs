use anyhow::Context;
use concierge::{AppState, api, utils::Config};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("concierge=debug,tower_http=debug,info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config).context("failed to build application state")?;
    tracing::info!(
        provider = state.llm_factory.default_provider().name(),
        "concierge starting"
    );

    let app = api::create_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
