use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

/// Workspace root override shared with the Docker-based analysis backend.
const WORKSPACE_ROOT_ENV: &str = "PG_WORKSPACE_ROOT";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub tasks: TaskSettings,
    pub uploads: UploadSettings,
    pub lifecycle: LifecycleSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
    pub workspace: WorkspaceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskSettings {
    /// Tasks kept in memory; the oldest are evicted beyond this.
    pub capacity: usize,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_upload_mb: usize,
}

impl UploadSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleSettings {
    /// Probability in `0.0..=1.0` that a job ends `failed`.
    pub failure_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub tokens: Vec<AccessTokenEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenEntry {
    pub token: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceSettings {
    pub root: String,
    /// When false, uploads are accepted but not written to disk.
    pub staging_enabled: bool,
}

impl Settings {
    /// Layers defaults, `appsettings.toml`, `appsettings.{env}.toml` and
    /// `APP__SECTION__KEY` environment variables, in that order.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("tasks.capacity", 100)?
            .set_default("tasks.default_page_size", 10)?
            .set_default("tasks.max_page_size", 100)?
            .set_default("uploads.max_upload_mb", 64)?
            .set_default("lifecycle.failure_rate", 0.0)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", environment == Environment::Prod)?
            .set_default("workspace.root", "./workspace")?
            .set_default("workspace.staging_enabled", true)?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            );

        if let Ok(root) = std::env::var(WORKSPACE_ROOT_ENV) {
            builder = builder.set_override("workspace.root", root)?;
        }

        builder.build()?.try_deserialize()
    }
}
