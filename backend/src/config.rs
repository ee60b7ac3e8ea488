use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "SERVICE_CONFIG";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config/service.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub fact_check: FactCheckConfig,
    pub decision: DecisionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// JSON artifact exported by the training job.
    pub path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "structural_model/fake_news_model.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry: RetryConfig,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-lite".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
            retry: RetryConfig::default(),
        }
    }
}

impl FactCheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff_base: u32,
    pub backoff_unit_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: 2,
            backoff_unit_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Inputs with fewer words than this skip the classifier.
    pub short_text_words: usize,
    pub short_text_confidence: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            short_text_words: 10,
            short_text_confidence: 0.95,
        }
    }
}

impl ServiceConfig {
    /// Loads the YAML file named by `SERVICE_CONFIG` (or the default path) and
    /// applies environment overrides. A missing file falls back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        let path = lookup(CONFIG_PATH_VAR).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_with(&path, lookup)
    }

    pub fn load_with<F>(path: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_string(),
                source,
            })?;
            log::info!("Loaded service config from {}", path);
            Self::from_yaml_str(&contents)?
        } else {
            log::warn!("Config file {} not found, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            self.model.path = path;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.fact_check.model = model;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let retry = &self.fact_check.retry;
        if retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "fact_check.retry.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if retry.backoff_base == 0 {
            return Err(ConfigError::Invalid {
                name: "fact_check.retry.backoff_base",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.decision.short_text_confidence) {
            return Err(ConfigError::Invalid {
                name: "decision.short_text_confidence",
                reason: "must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}

/// The fact-check credential is read once at startup; a missing key stops the process.
pub fn require_api_key<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_KEY_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ServiceConfig::from_yaml_str("fact_check:\n  model: gemini-test\n").unwrap();
        assert_eq!(config.fact_check.model, "gemini-test");
        assert_eq!(config.fact_check.retry.max_attempts, 3);
        assert_eq!(config.fact_check.retry.backoff_base, 2);
        assert_eq!(config.decision.short_text_words, 10);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn missing_file_uses_defaults_with_env_overrides() {
        let config = ServiceConfig::load_with(
            "does/not/exist.yaml",
            env(&[("PORT", "9100"), ("MODEL_PATH", "/models/m.json")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.model.path, "/models/m.json");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ServiceConfig::load_with("does/not/exist.yaml", env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let config =
            ServiceConfig::from_yaml_str("fact_check:\n  retry:\n    max_attempts: 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn api_key_is_required() {
        assert!(matches!(require_api_key(env(&[])), Err(ConfigError::MissingApiKey)));
        assert!(matches!(
            require_api_key(env(&[(API_KEY_VAR, "   ")])),
            Err(ConfigError::MissingApiKey)
        ));
        assert_eq!(require_api_key(env(&[(API_KEY_VAR, " abc ")])).unwrap(), "abc");
    }
}
