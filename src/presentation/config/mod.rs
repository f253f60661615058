mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AccessTokenEntry, AuthSettings, LifecycleSettings, LoggingSettings, ServerSettings, Settings,
    TaskSettings, UploadSettings, WorkspaceSettings,
};
