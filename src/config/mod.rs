use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Endpoint the catalog is fetched from unless configured otherwise
pub const DEFAULT_ENDPOINT: &str = "https://backend-production-c4f6.up.railway.app/";

/// Image shown for products without any image
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the product list is fetched from
    pub endpoint: String,

    /// Read the catalog from this JSON file instead of the endpoint
    pub catalog_file: Option<PathBuf>,

    /// Image reference for products that have no images
    pub placeholder_image: String,

    /// Input poll interval of the interactive viewer
    pub tick_rate_ms: u64,

    /// Whether mouse clicks are captured
    pub mouse_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            catalog_file: None,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            tick_rate_ms: 100,
            mouse_enabled: true,
        }
    }
}

impl Config {
    /// Initialize configuration from the config file and environment
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match Self::load_from_paths(&Self::config_paths()).await {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Ignoring unreadable configuration file: {}", e);
                Self::default()
            }
        };

        config.load_from_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Candidate configuration files, highest priority first:
    /// 1. ./.vitrine.json
    /// 2. ./vitrine.json
    /// 3. $CONFIG_DIR/vitrine/vitrine.json
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.vitrine.json"), PathBuf::from("./vitrine.json")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("vitrine").join("vitrine.json"));
        }

        paths
    }

    /// Load the first configuration file that exists. Fields the file leaves
    /// out keep their defaults.
    pub async fn load_from_paths(paths: &[PathBuf]) -> Result<Option<Self>> {
        for path in paths {
            if path.exists() {
                return Self::load_from_file(path).await.map(Some);
            }
        }
        Ok(None)
    }

    pub async fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid configuration in {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Apply `VITRINE_*` environment overrides read through `lookup`
    pub fn load_from_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup("VITRINE_ENDPOINT") {
            self.endpoint = endpoint;
        }

        if let Some(file) = lookup("VITRINE_CATALOG_FILE") {
            self.catalog_file = Some(PathBuf::from(file));
        }

        if let Some(placeholder) = lookup("VITRINE_PLACEHOLDER_IMAGE") {
            self.placeholder_image = placeholder;
        }

        if let Some(tick_str) = lookup("VITRINE_TICK_MS") {
            match tick_str.parse() {
                Ok(tick) => self.tick_rate_ms = tick,
                Err(_) => warn!("Ignoring VITRINE_TICK_MS={}: not a number", tick_str),
            }
        }

        if let Some(mouse_str) = lookup("VITRINE_MOUSE") {
            self.mouse_enabled = mouse_str.to_lowercase() != "false";
        }
    }

    /// Apply command line overrides, which beat every other source
    pub fn apply_overrides(&mut self, endpoint: Option<String>, catalog_file: Option<PathBuf>) {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if catalog_file.is_some() {
            self.catalog_file = catalog_file;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog_file.is_none() {
            let url = reqwest::Url::parse(&self.endpoint)
                .map_err(|e| anyhow::anyhow!("Invalid endpoint '{}': {}", self.endpoint, e))?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow::anyhow!(
                    "Endpoint must be an http or https URL, got '{}'",
                    self.endpoint
                ));
            }
        }

        if self.placeholder_image.is_empty() {
            return Err(anyhow::anyhow!("placeholder_image must not be empty"));
        }

        if self.tick_rate_ms == 0 {
            return Err(anyhow::anyhow!("tick_rate_ms must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.load_from_env(env(&[
            ("VITRINE_ENDPOINT", "http://localhost:8000/"),
            ("VITRINE_TICK_MS", "50"),
            ("VITRINE_MOUSE", "false"),
        ]));

        assert_eq!(config.endpoint, "http://localhost:8000/");
        assert_eq!(config.tick_rate_ms, 50);
        assert!(!config.mouse_enabled);
    }

    #[test]
    fn test_bad_tick_env_is_ignored() {
        let mut config = Config::default();
        config.load_from_env(env(&[("VITRINE_TICK_MS", "soon")]));
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config::default();
        config.load_from_env(env(&[("VITRINE_ENDPOINT", "http://env/")]));
        config.apply_overrides(Some("http://cli/".to_string()), None);
        assert_eq!(config.endpoint, "http://cli/");
        assert_eq!(config.catalog_file, None);
    }

    #[test]
    fn test_validate_rejects_bad_endpoints() {
        let mut config = Config::default();
        config.endpoint = "ftp://example.com/products".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());

        // A local catalog file makes the endpoint irrelevant
        config.catalog_file = Some(PathBuf::from("products.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let mut config = Config::default();
        config.tick_rate_ms = 0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpoint": "http://localhost:9000/"}}"#).unwrap();

        let config = Config::load_from_paths(&[PathBuf::from("/nonexistent/vitrine.json"), file.path().to_path_buf()])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(config.endpoint, "http://localhost:9000/");
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[tokio::test]
    async fn test_missing_files() {
        let loaded = Config::load_from_paths(&[PathBuf::from("/nonexistent/vitrine.json")]).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(Config::load_from_file(file.path()).await.is_err());
    }
}
