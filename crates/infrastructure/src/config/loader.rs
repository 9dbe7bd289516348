use anyhow::{Context, Result};
use domain::config::*;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info, warn};

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "USERAPP_".to_string(),
        }
    }

    /// Check `path` before the default locations
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config_paths.insert(0, path);
        self
    }

    /// Only consider `path`, ignoring the default locations
    pub fn with_only_path(mut self, path: PathBuf) -> Self {
        self.config_paths = vec![path];
        self
    }

    pub fn with_env_prefix(mut self, prefix: String) -> Self {
        self.env_prefix = prefix;
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        paths.push(PathBuf::from("user-app.toml"));
        paths.push(PathBuf::from("user-app.json"));

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("user-app").join("config.toml"));
            paths.push(config_dir.join("user-app").join("config.json"));
        }

        paths
    }

    pub async fn load(&self) -> Result<AppConfig> {
        self.load_with_source().await.map(|(config, _)| config)
    }

    pub async fn load_with_source(&self) -> Result<(AppConfig, ConfigSource)> {
        let profile = self.detect_profile();
        debug!("Detected profile: {}", profile.name());

        let (mut config, source) = match self.load_base_config().await {
            Some((file_config, path)) => (file_config, ConfigSource::File(path)),
            None => (AppConfig::for_profile(profile.clone()), ConfigSource::Default),
        };

        // An explicit environment profile wins over the file's
        if self.profile_from_env().is_some() {
            config.profile = profile;
        }

        self.apply_env_overrides(&mut config);
        Ok((config, source))
    }

    /// Load a specific file; unlike [`ConfigLoader::load`] a missing file is an error
    pub async fn load_from(&self, path: &Path) -> Result<AppConfig> {
        let mut config = self
            .load_file(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        info!("Loaded configuration from: {}", path.display());

        if let Some(profile) = self.profile_from_env() {
            config.profile = profile;
        }
        self.apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Detect the active profile from environment variables
    pub fn detect_profile(&self) -> Profile {
        self.profile_from_env().unwrap_or_default()
    }

    fn profile_from_env(&self) -> Option<Profile> {
        env::var(format!("{}ENV", self.env_prefix))
            .ok()
            .map(|env_val| Profile::from_str(&env_val).unwrap_or_default())
    }

    /// First readable config file wins
    async fn load_base_config(&self) -> Option<(AppConfig, PathBuf)> {
        for path in &self.config_paths {
            if path.exists() {
                match self.load_file(path).await {
                    Ok(file_config) => {
                        info!("Loaded base configuration from: {}", path.display());
                        return Some((file_config, path.clone()));
                    }
                    Err(e) => {
                        warn!("Failed to load base config from {}: {:#}", path.display(), e);
                    }
                }
            }
        }
        None
    }

    async fn load_file(&self, path: &Path) -> Result<AppConfig> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" | "" => toml::from_str(&content).context("Failed to parse TOML config"),
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config"),
            _ => {
                // Try TOML first, then JSON
                toml::from_str(&content)
                    .or_else(|_| serde_json::from_str(&content))
                    .context("Failed to parse config file")
            }
        }
    }

    fn apply_env_overrides(&self, config: &mut AppConfig) {
        // Logging settings
        if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
            config.logging.level = log_level;
        }

        if let Ok(json) = env::var(format!("{}LOG_JSON", self.env_prefix)) {
            config.logging.json = parse_flag(&json);
        }

        // Repository settings
        if let Ok(capacity) = env::var(format!("{}REPOSITORY_CAPACITY", self.env_prefix)) {
            match capacity.parse() {
                Ok(capacity) => config.repository.capacity = Some(capacity),
                Err(_) => warn!("Ignoring non-numeric repository capacity: {}", capacity),
            }
        }

        if let Ok(allow) = env::var(format!("{}REPOSITORY_ALLOW_DUPLICATES", self.env_prefix)) {
            config.repository.allow_duplicates = parse_flag(&allow);
        }

        if let Ok(max_len) = env::var(format!("{}REPOSITORY_MAX_VALUE_LENGTH", self.env_prefix)) {
            if let Ok(max_len) = max_len.parse() {
                config.repository.max_value_length = max_len;
            }
        }
    }

    pub async fn save_config(&self, config: &AppConfig, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        let content = match extension {
            "json" => serde_json::to_string_pretty(config)?,
            _ => toml::to_string_pretty(config)?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, content).await?;
        info!("Configuration saved to: {}", path.display());

        Ok(())
    }

    /// Render a configuration as TOML
    pub fn render(config: &AppConfig) -> Result<String> {
        toml::to_string_pretty(config).context("Failed to render configuration")
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
