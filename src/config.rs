use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub source: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
    pub images_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_timeout: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                base_url: "https://andres-torrez.github.io/iphone-catalog/".to_string(),
                source: "github-pages-catalog".to_string(),
                currency: "EUR".to_string(),
            },
            output: OutputConfig {
                csv_path: PathBuf::from("data/prices.csv"),
                json_path: PathBuf::from("data/prices.json"),
                images_dir: PathBuf::from("data/images"),
            },
            http: HttpConfig {
                user_agent: "pricetrail/0.1 (+https://github.com/your-handle/pricetrail)"
                    .to_string(),
                request_timeout: 20,
                retry_attempts: 3,
                retry_delay_ms: 500,
            },
        }
    }
}

impl AppConfig {
    /// Layered load: built-in defaults, then an optional config file, then
    /// `PRICETRAIL__`-prefixed environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&AppConfig::default())?;

        let s = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/pricetrail").required(false))
            .add_source(Environment::with_prefix("PRICETRAIL").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(_) = Url::parse(&self.catalog.base_url) {
            return Err(ConfigError::Message("Invalid base URL format".into()));
        }

        if self.catalog.source.is_empty() {
            return Err(ConfigError::Message("Source identifier must not be empty".into()));
        }

        if self.http.user_agent.is_empty() {
            return Err(ConfigError::Message("User agent must not be empty".into()));
        }

        if self.http.request_timeout == 0 {
            return Err(ConfigError::Message("Request timeout must be greater than 0".into()));
        }

        if self.http.retry_delay_ms == 0 {
            return Err(ConfigError::Message("Retry delay must be greater than 0".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_base_url() {
        let mut config = AppConfig::default();
        config.catalog.base_url = "not-a-valid-url".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid base URL"));
    }

    #[test]
    fn test_config_validation_empty_source() {
        let mut config = AppConfig::default();
        config.catalog.source = String::new();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Source identifier"));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = AppConfig::default();
        config.http.request_timeout = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Request timeout"));
    }

    #[test]
    fn test_default_output_paths() {
        let config = AppConfig::default();

        assert_eq!(config.output.csv_path, PathBuf::from("data/prices.csv"));
        assert_eq!(config.output.json_path, PathBuf::from("data/prices.json"));
        assert_eq!(config.output.images_dir, PathBuf::from("data/images"));
    }
}
