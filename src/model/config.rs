use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "STAYSAFE_CONFIG_PATH";
const ENV_REPORT_MODEL: &str = "REPORT_MODEL";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_FIXTURE_PATH: &str = "data/incidents.csv";
const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Where incidents are read from
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentConfig {
    /// CSV fixture with `id,date,criteria,observations,risks,solution` columns
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,
}

impl Default for IncidentConfig {
    fn default() -> Self {
        Self {
            fixture_path: default_fixture_path(),
        }
    }
}

fn default_fixture_path() -> String {
    DEFAULT_FIXTURE_PATH.to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Report generation settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Model name; falls back to the generator default when unset
    #[serde(default)]
    pub model: Option<String>,
    /// Total attempts per evaluation (1 disables retries, clamped to 1-4 by the generator)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub incidents: IncidentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub incidents: IncidentConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            incidents: IncidentConfig::default(),
            storage: StorageConfig::default(),
            llm: LlmConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let mut llm = file.llm;
        if let Ok(model) = std::env::var(ENV_REPORT_MODEL) {
            llm.model = Some(model);
        }

        Self {
            incidents: file.incidents,
            storage: file.storage,
            llm,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse_config(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration from file");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse_config("  \n").unwrap();
        assert_eq!(config.incidents.fixture_path, DEFAULT_FIXTURE_PATH);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.llm.max_attempts, 1);
        assert!(config.llm.model.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let yaml = r#"
storage:
  backend: memory
llm:
  model: gpt-4o
"#;
        let config = Config::parse_config(yaml).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.llm.max_attempts, 1);
        assert_eq!(config.incidents.fixture_path, DEFAULT_FIXTURE_PATH);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let yaml = "storage:\n  backend: mongodb\n";
        assert!(Config::parse_config(yaml).is_err());
    }
}
