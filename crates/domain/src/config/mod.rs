use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration profile for different environments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Development profile with verbose, human readable logging
    #[default]
    Dev,
    /// Production profile with JSON logging
    Prod,
    /// Custom profile with user-defined name
    Custom(String),
}

impl Profile {
    /// Get the profile name as a string
    pub fn name(&self) -> &str {
        match self {
            Profile::Dev => "dev",
            Profile::Prod => "prod",
            Profile::Custom(name) => name,
        }
    }
}

impl FromStr for Profile {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "dev" | "development" => Profile::Dev,
            "prod" | "production" => Profile::Prod,
            custom => Profile::Custom(custom.to_string()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Active configuration profile
    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

impl AppConfig {
    /// Defaults tuned for a profile: prod logs JSON at info, dev logs text at debug
    pub fn for_profile(profile: Profile) -> Self {
        let logging = match profile {
            Profile::Prod => LoggingSettings {
                level: "info".to_string(),
                json: true,
                color: false,
            },
            Profile::Dev => LoggingSettings {
                level: "debug".to_string(),
                ..LoggingSettings::default()
            },
            Profile::Custom(_) => LoggingSettings::default(),
        };

        Self {
            profile,
            logging,
            repository: RepositoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per event instead of formatted text
    #[serde(default)]
    pub json: bool,

    #[serde(default = "default_color")]
    pub color: bool,
}

/// Policy of the in-memory user repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Maximum number of stored values; `None` means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Whether saving a value that is already stored succeeds
    #[serde(default = "default_allow_duplicates")]
    pub allow_duplicates: bool,

    /// Longest accepted value, in bytes
    #[serde(default = "default_max_value_length")]
    pub max_value_length: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            color: default_color(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            allow_duplicates: default_allow_duplicates(),
            max_value_length: default_max_value_length(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_color() -> bool {
    true
}

fn default_allow_duplicates() -> bool {
    true
}

fn default_max_value_length() -> usize {
    1024
}
