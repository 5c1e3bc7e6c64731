use crate::app_dirs::AppDirs;
use crate::generator::{GeneratorSettings, QuestionKind};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub pad_meaning_distractors: bool,
    pub enabled_kinds: Vec<QuestionKind>,
    /// Fixed seed for reproducible quizzes; `None` draws from the thread rng
    pub seed: Option<u64>,
    pub default_topic: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pad_meaning_distractors: false,
            enabled_kinds: QuestionKind::ALL.to_vec(),
            seed: None,
            default_topic: "daily_life".to_string(),
        }
    }
}

impl From<&Config> for GeneratorSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            pad_meaning_distractors: cfg.pad_meaning_distractors,
            enabled_kinds: cfg.enabled_kinds.clone(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("lexiquiz_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring unreadable config {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
