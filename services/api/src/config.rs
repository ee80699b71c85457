//! Service configuration

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Runtime settings for the roster service
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Path of the JSON document the service persists into
    pub data_file: String,
    /// Directory attachment uploads are stored in
    pub uploads_dir: String,
}

impl Settings {
    /// Load settings from the environment, falling back to defaults.
    ///
    /// # Environment Variables
    /// - `ROSTER_HOST`: bind address (default: "0.0.0.0")
    /// - `ROSTER_PORT`: bind port (default: 3001)
    /// - `ROSTER_DATA_FILE`: document path (default: "data/db.json")
    /// - `ROSTER_UPLOADS_DIR`: uploads directory (default: "uploads")
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("data_file", "data/db.json")?
            .set_default("uploads_dir", "uploads")?
            .add_source(Environment::with_prefix("ROSTER").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
