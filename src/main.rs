//! LocalLibrary inventory report
//!
//! Connects to the catalog database, applies migrations and logs the index
//! counts together with every overdue loan.

use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locallibrary::{
    config::AppConfig,
    models::SummaryFilter,
    repository::PgCatalogStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("locallibrary={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting LocalLibrary v{}", env!("CARGO_PKG_VERSION"));

    let store = PgCatalogStore::connect(&config.database).await?;
    let state = AppState::new(config, Arc::new(store));
    let queries = &state.services.queries;

    let summary = queries.summary(&SummaryFilter::default()).await?;
    tracing::info!(
        books = summary.books,
        instances = summary.instances,
        available = summary.available_instances,
        authors = summary.authors,
        "Catalog inventory"
    );

    let today = Utc::now().date_naive();
    let overdue = queries.list_overdue(today).await?;
    for instance in &overdue {
        tracing::warn!(
            instance = %instance.id,
            borrower = ?instance.borrower_id,
            due_back = ?instance.due_back,
            "Overdue loan"
        );
    }
    tracing::info!("{} overdue loan(s) as of {}", overdue.len(), today);

    Ok(())
}
