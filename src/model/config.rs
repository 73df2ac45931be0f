use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "FLAREUP_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

fn default_oracle_timeout_secs() -> u64 {
    30
}

fn default_max_related_cases() -> usize {
    3
}

fn default_max_input_chars() -> usize {
    1000
}

/// Analysis tuning configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Time budget for the oracle call, in seconds
    #[serde(default = "default_oracle_timeout_secs")]
    pub oracle_timeout_secs: u64,
    /// How many related incidents to retrieve per analysis
    #[serde(default = "default_max_related_cases")]
    pub max_related_cases: usize,
    /// Maximum accepted input length, in characters
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            oracle_timeout_secs: default_oracle_timeout_secs(),
            max_related_cases: default_max_related_cases(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
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

        let analysis = Self::load_config_file(&config_path)
            .map(|cf| cf.analysis)
            .unwrap_or_default();

        Self {
            analysis,
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
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
