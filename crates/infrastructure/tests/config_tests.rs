#[cfg(test)]
mod tests {
    use domain::config::*;
    use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;
    use tokio::fs;

    #[tokio::test]
    async fn test_default_config_creation() {
        let config = AppConfig::default();

        assert_eq!(config.profile, Profile::Dev);
        assert_eq!(config.logging.level, "info");
        assert!(config.repository.allow_duplicates);
    }

    #[tokio::test]
    #[serial]
    async fn test_config_loader_from_toml() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("user-app.toml");

        let toml_content = r#"
profile = "prod"

[logging]
level = "debug"
json = true

[repository]
capacity = 10
allow_duplicates = false
"#;

        fs::write(&config_path, toml_content).await?;

        let loader = ConfigLoader::new().with_only_path(config_path.clone());
        let (config, source) = loader.load_with_source().await?;

        assert_eq!(source, ConfigSource::File(config_path));
        assert_eq!(config.profile, Profile::Prod);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.repository.capacity, Some(10));
        assert!(!config.repository.allow_duplicates);
        assert_eq!(config.repository.max_value_length, 1024);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_config_loader_from_json() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("user-app.json");

        let json_content = r#"{
  "repository": {
    "max_value_length": 64
  }
}"#;

        fs::write(&config_path, json_content).await?;

        let loader = ConfigLoader::new().with_only_path(config_path);
        let config = loader.load().await?;

        assert_eq!(config.repository.max_value_length, 64);
        assert_eq!(config.logging.level, "info");

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_files_fall_back_to_profile_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let loader = ConfigLoader::new().with_only_path(temp_dir.path().join("absent.toml"));

        let (config, source) = loader.load_with_source().await?;

        assert_eq!(source, ConfigSource::Default);
        assert_eq!(config.profile, Profile::Dev);
        assert_eq!(config.logging.level, "debug");

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_load_from_requires_the_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let loader = ConfigLoader::new();

        let result = loader.load_from(&temp_dir.path().join("absent.toml")).await;

        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("absent.toml"));
    }

    #[tokio::test]
    #[serial]
    async fn test_env_override() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        env::set_var("USERAPP_ENV", "production");
        env::set_var("USERAPP_LOG_LEVEL", "trace");
        env::set_var("USERAPP_REPOSITORY_CAPACITY", "3");
        env::set_var("USERAPP_REPOSITORY_ALLOW_DUPLICATES", "no");

        let loader = ConfigLoader::new().with_only_path(temp_dir.path().join("absent.toml"));
        let config = loader.load().await?;

        assert_eq!(config.profile, Profile::Prod);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.repository.capacity, Some(3));
        assert!(!config.repository.allow_duplicates);

        // Clean up
        env::remove_var("USERAPP_ENV");
        env::remove_var("USERAPP_LOG_LEVEL");
        env::remove_var("USERAPP_REPOSITORY_CAPACITY");
        env::remove_var("USERAPP_REPOSITORY_ALLOW_DUPLICATES");

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_custom_env_prefix() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        env::set_var("ALT_LOG_JSON", "1");

        let loader = ConfigLoader::new()
            .with_env_prefix("ALT_".to_string())
            .with_only_path(temp_dir.path().join("absent.toml"));
        let config = loader.load().await?;

        assert!(config.logging.json);

        env::remove_var("ALT_LOG_JSON");

        Ok(())
    }

    #[tokio::test]
    async fn test_config_validation_success() {
        let config = AppConfig::default();
        let validator = ConfigValidator::new();

        assert!(validator.validate(&config).is_ok());
        assert!(validator
            .validate(&AppConfig::for_profile(Profile::Prod))
            .is_ok());
    }

    #[tokio::test]
    async fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "invalid".to_string();

        let validator = ConfigValidator::new();
        let result = validator.validate(&config);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("log level"));
    }

    #[tokio::test]
    async fn test_config_validation_zero_capacity() {
        let mut config = AppConfig::default();
        config.repository.capacity = Some(0);

        let result = ConfigValidator::new().validate(&config);

        assert!(result.unwrap_err().to_string().contains("capacity"));
    }

    #[tokio::test]
    async fn test_save_config_round_trips_through_loader() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("user-app.toml");

        let mut config = AppConfig::default();
        config.repository.capacity = Some(999);

        let loader = ConfigLoader::new();
        loader.save_config(&config, &config_path).await?;

        let content = fs::read_to_string(&config_path).await?;
        assert!(content.contains("999"));
        assert_eq!(content, ConfigLoader::render(&config)?);

        let reloaded = loader.load_from(&config_path).await?;
        assert_eq!(reloaded.repository.capacity, Some(999));
        assert_eq!(reloaded.logging, config.logging);
        assert_eq!(reloaded.profile, config.profile);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_with_path_is_checked_before_default_locations() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("explicit.json");
        fs::write(&config_path, r#"{ "repository": { "capacity": 4 } }"#).await?;

        let loader = ConfigLoader::new().with_path(config_path.clone());
        let (config, source) = loader.load_with_source().await?;

        assert_eq!(source, ConfigSource::File(config_path));
        assert_eq!(config.repository.capacity, Some(4));

        Ok(())
    }
}
