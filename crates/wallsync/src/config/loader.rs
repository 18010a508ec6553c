use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.wallpaper_directory.is_empty() {
        return Err(ConfigError::Validation {
            message: "wallpaper_directory must not be empty".to_string(),
        });
    }

    if config.manifest_path.is_empty() {
        return Err(ConfigError::Validation {
            message: "manifest_path must not be empty".to_string(),
        });
    }

    if config.database_path.is_empty() {
        return Err(ConfigError::Validation {
            message: "database_path must not be empty".to_string(),
        });
    }

    if config.fallback_category.is_empty() {
        return Err(ConfigError::Validation {
            message: "fallback_category must not be empty".to_string(),
        });
    }

    for rule in &config.categories {
        if rule.category.is_empty() {
            return Err(ConfigError::Validation {
                message: "category rule with empty category name".to_string(),
            });
        }
        if rule.keywords.is_empty() || rule.keywords.iter().any(String::is_empty) {
            return Err(ConfigError::Validation {
                message: format!("category rule '{}' needs non-empty keywords", rule.category),
            });
        }
    }

    Ok(())
}
