use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
    #[serde(default)]
    pub save: SaveConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the draft snapshot and logs
    #[serde(default = "default_data_dir")]
    pub data: String,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("kaisetsu"))
        .unwrap_or_else(|| PathBuf::from(".kaisetsu"))
        .to_string_lossy()
        .to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
}

fn default_refresh_rate() -> u64 {
    250
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Quiet period after the last change before an autosave fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    1500
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Policy knobs for the shared save routine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfig {
    /// When true, a manual save clears the unsaved-changes flag once the
    /// local snapshot is written, even if the remote sync failed. When
    /// false, only a successful remote sync clears it.
    #[serde(default = "default_manual_clears_dirty")]
    pub manual_clears_dirty: bool,
}

fn default_manual_clears_dirty() -> bool {
    true
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            manual_clears_dirty: default_manual_clears_dirty(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteMode {
    #[default]
    Simulated,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub mode: RemoteMode,
    /// Simulated backend latency
    #[serde(default = "default_remote_latency")]
    pub latency_ms: u64,
    /// Simulated backend failure probability (0.0 - 1.0)
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
    /// Endpoint for `mode = "http"`
    #[serde(default)]
    pub endpoint: String,
}

fn default_remote_latency() -> u64 {
    600
}

fn default_failure_rate() -> f64 {
    0.15
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            mode: RemoteMode::Simulated,
            latency_ms: default_remote_latency(),
            failure_rate: default_failure_rate(),
            endpoint: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the wizard works without any file
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/kaisetsu/ (optional overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("kaisetsu").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with KAISETSU_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("KAISETSU")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Absolute path to the data directory
    pub fn data_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.data);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    pub fn logs_path(&self) -> PathBuf {
        self.data_path().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.ui.refresh_rate_ms, 250);
        assert_eq!(config.autosave.debounce_ms, 1500);
        assert!(config.save.manual_clears_dirty);
        assert_eq!(config.remote.mode, RemoteMode::Simulated);
        assert!(config.remote.failure_rate > 0.0 && config.remote.failure_rate < 1.0);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml = "[autosave]\ndebounce_ms = 300\n";
        let parsed: Config = toml::from_str(toml).unwrap();
        assert_eq!(parsed.autosave.debounce_ms, 300);
        assert_eq!(parsed.ui.refresh_rate_ms, 250);
        assert!(parsed.save.manual_clears_dirty);
    }

    #[test]
    fn logs_path_is_under_data_dir() {
        let mut config = Config::default();
        config.paths.data = "/tmp/kaisetsu-test".to_string();
        assert_eq!(config.logs_path(), PathBuf::from("/tmp/kaisetsu-test/logs"));
    }
}
