//! Nexus Reports API Server
//!
//! Main entry point for the report generation service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nexus_api::{AppState, create_router};
use nexus_core::{ContentResolver, FinancialModelLibrary, ReportCatalog, ReportGenerator, SubjectDirectory};
use nexus_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nexus=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Build the engine
    let catalog = ReportCatalog::standard();
    catalog.validate()?;
    info!(archetypes = catalog.archetypes().len(), "Report catalogue loaded");

    let directory = Arc::new(SubjectDirectory::standard());
    let resolver = Arc::new(ContentResolver::standard());
    let library = Arc::new(FinancialModelLibrary::standard());
    let generator = ReportGenerator::new(Arc::new(catalog), directory)
        .with_standard_composers(&resolver, &library, &config.branding)
        .with_reports_config(&config.reports);
    info!(
        engine = %config.branding.engine_name,
        separator = %config.reports.file_name_separator,
        "Report generator configured"
    );

    // Create application state
    let state = AppState {
        generator: Arc::new(generator),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
