use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use interessement_engine::api::{AppState, create_router};
use interessement_engine::config::{ConfigLoader, ServerSettings};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = ServerSettings::from_env().context("Invalid server settings")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting intéressement estimator v{}", env!("CARGO_PKG_VERSION"));

    let config = ConfigLoader::load(&settings.scheme_config_dir).with_context(|| {
        format!(
            "Failed to load scheme configuration from {}",
            settings.scheme_config_dir.display()
        )
    })?;
    let constants = config.constants();
    info!(
        scheme = %config.scheme().name,
        reference_year = constants.reference_year(),
        bonus_pool = %constants.bonus_pool,
        beneficiaries = constants.beneficiary_count,
        "Scheme configuration loaded"
    );

    let app = create_router(AppState::new(config)).layer(TraceLayer::new_for_http());

    let addr = settings.socket_addr()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
