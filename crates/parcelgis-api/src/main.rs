use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parcelgis_api::routes::create_router;
use parcelgis_api::state::{AppState, ServiceContext};
use parcelgis_core::config::ServiceConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parcelgis_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration is invalid");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        soc_table = %config.soc.table,
        natura_table = %config.natura.table,
        "Starting ParcelGIS API server"
    );

    let state = Arc::new(AppState::new());

    // Serve right away; requests are answered 503 until the background
    // initialization publishes the service context.
    let init_state = state.clone();
    let init_config = config.clone();
    tokio::spawn(async move {
        match ServiceContext::initialize(init_config).await {
            Ok(context) => {
                init_state.install(Arc::new(context));
                tracing::info!("Service context ready");
            }
            Err(e) => {
                tracing::error!("Initialization failed: {}", e);
                tracing::error!(
                    "Remediation:\n\
                    1. Ensure the geometry store is running\n\
                    2. Verify DATABASE_URL is correct and the database is accessible"
                );
                std::process::exit(1);
            }
        }
    });

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.unwrap();
}
