use std::path::Path;

use api_key_dashboard::{
    config::Config, database::Database, routes, security::KeyGenerator, service::ApiKeyService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    if let Some(dir) = Path::new(&config.database_path).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let db = Database::new(&config.database_path)?;
    let service = ApiKeyService::new(db, KeyGenerator::new(config.key_prefix.clone()));
    let app = routes::app(service);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
