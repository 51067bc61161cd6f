use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub server_url: String,
    pub path_separator: char,
    pub request_timeout_ms: u64,
    pub history_reverse: bool,
    pub log_filter: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            path_separator: ':',
            request_timeout_ms: 5_000,
            history_reverse: false,
            log_filter: "info".to_string(),
        }
    }
}

/// `viewer.toml` in the platform config dir, if the platform has one.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "synthview").map(|dirs| dirs.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    config_path()
        .map(|path| load_from(&path))
        .unwrap_or_default()
}

/// Missing file means defaults; a broken one is reported and ignored.
pub(crate) fn load_from(path: &Path) -> ViewerConfig {
    let Ok(text) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    match toml::from_str(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable viewer config");
            ViewerConfig::default()
        }
    }
}

/// Writes `cfg` to the platform config file and returns where it went.
pub fn save(cfg: &ViewerConfig) -> anyhow::Result<PathBuf> {
    let path = config_path().context("platform has no config directory")?;
    save_to(cfg, &path)?;
    Ok(path)
}

pub(crate) fn save_to(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let text = toml::to_string_pretty(cfg).context("encode viewer config")?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}
