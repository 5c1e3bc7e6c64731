use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub const APP_NAME: &'static str = "lexiquiz";

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", Self::APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }
}
