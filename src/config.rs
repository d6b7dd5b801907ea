use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::store::COOKIE_NAME;

const CONFIG_FILE: &str = "config.json";
const JAR_FILE: &str = "cookies.txt";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Key the list is stored under.
    pub cookie_name: String,
    /// Cookie file location. Defaults to `cookies.txt` in the data directory.
    pub jar_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cookie_name: COOKIE_NAME.to_string(),
            jar_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self> {
        let config_path = config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config file")
    }

    /// Where the cookie file lives, honouring `jar_path` when set.
    pub fn resolved_jar_path(&self) -> Result<PathBuf> {
        match &self.jar_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(JAR_FILE)),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "ft-list")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}
