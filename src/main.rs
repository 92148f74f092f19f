use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::config::ApiConfig;
use slotbook_api::stores::{InMemoryBusySource, InMemoryScheduleStore};
use slotbook_core::resolver::Engine;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Wire the engine with in-memory collaborators; deployments with a
    // real schedule store or calendar integration substitute their own
    // implementations here.
    let engine = Engine::new(
        Arc::new(InMemoryScheduleStore::default()),
        Arc::new(InMemoryBusySource::default()),
    );

    // Start API server
    slotbook_api::start_server(config, engine).await?;

    Ok(())
}
