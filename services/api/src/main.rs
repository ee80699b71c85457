use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::config::Settings;
use api::models::Store;
use api::routes;
use api::state::AppState;
use api::uploads::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting roster service");

    let settings = Settings::load()?;

    // The document and the uploads both live on the local filesystem
    if let Some(parent) = std::path::Path::new(&settings.data_file).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let store = Store::open(&settings.data_file).await?;
    info!("Document store ready at {}", settings.data_file);

    let uploads = UploadStore::new(&settings.uploads_dir);
    uploads.ensure_dir().await?;

    let app_state = AppState::new(store, uploads);

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Roster service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
