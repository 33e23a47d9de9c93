use anyhow::Context;
use dfn_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "dfn.config.json";

/// DFN project configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON store holding the working novel
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Undo levels kept per session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Characters sent to the title suggestion service
    #[serde(default = "default_suggest_input_limit")]
    pub suggest_input_limit: usize,

    /// Where exported .dfn files go
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_store_path() -> String {
    "novel.json".to_string()
}

fn default_history_limit() -> usize {
    200
}

fn default_autosave_debounce_ms() -> u64 {
    1000
}

fn default_suggest_input_limit() -> usize {
    2000
}

fn default_out_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn store_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_path)
    }

    pub fn out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_limit: self.history_limit,
            autosave_debounce: Duration::from_millis(self.autosave_debounce_ms),
            suggest_input_limit: self.suggest_input_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            history_limit: default_history_limit(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            suggest_input_limit: default_suggest_input_limit(),
            out_dir: default_out_dir(),
        }
    }
}
