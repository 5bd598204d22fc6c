use std::sync::Arc;

use beautyton_api::{access_policy, config::ApiConfig, init_tracing, ApiState};
use beautyton_core::repositories::Repositories;
use beautyton_db::{create_pool, schema::initialize_database, storage::LocalFileStore, store::PgStore};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Wire stores and usecases
    let files = LocalFileStore::new(config.file_storage_dir.clone()).await?;
    info!("Storing uploads under {}", files.root().display());
    let repos = Repositories::from_store(Arc::new(PgStore::new(db_pool)), Arc::new(files));
    let access = access_policy(config.slot_access_policy, &repos);
    let state = Arc::new(ApiState::new(&repos, access));

    // Start API server
    beautyton_api::start_server(config, state).await?;

    Ok(())
}
