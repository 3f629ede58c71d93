use catalog_axum::{router, start_server};
use catalog_core::service::ProductService;
use catalog_sqlite::Db;
use catalogd::{AppConfig, Cli};
use std::fs::File;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project, and subscribe to them here.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let service = ProductService::new(db);

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let (_, schema) = router(service, server);
        serde_json::to_writer_pretty(File::create(&path)?, &schema)?;
        tracing::info!(path = %path.display(), "wrote OpenAPI document");
        return Ok(());
    }

    start_server(server, service).await?;
    Ok(())
}
