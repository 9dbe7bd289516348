use anyhow::Result;
use common::LoggingConfig;
use domain::config::LoggingSettings;

/// Translate the file/env logging settings into the subscriber configuration.
/// `force_json` comes from the `--json-logs` flag.
pub fn logging_config(settings: &LoggingSettings, force_json: bool) -> Result<LoggingConfig> {
    let mut config = LoggingConfig::from_level_name(&settings.level)?;
    config.json_output = settings.json || force_json;
    config.color_output = settings.color && !config.json_output;
    Ok(config)
}
