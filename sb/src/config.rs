//! Snowball configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Planner (breakdown/re-plan) configuration
    pub planner: PlannerConfig,

    /// TUI configuration
    pub ui: UiConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the API-key environment variable is set. Call this early
    /// in startup to fail fast with a clear error message.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .snowball.yml
        let local_config = PathBuf::from(".snowball.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/snowball/snowball.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("snowball").join("snowball.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("anthropic" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("Environment variable {} is not set", self.api_key_env))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

/// Planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Sampling temperature for both planner calls
    pub temperature: f32,

    /// Max tokens for planner responses
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

/// TUI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event tick interval in milliseconds (~30 FPS)
    #[serde(rename = "tick-ms")]
    pub tick_ms: u64,

    /// Loading-tip rotation interval in milliseconds
    #[serde(rename = "tip-interval-ms")]
    pub tip_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 33,
            tip_interval_ms: 2500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.api_key_env, "ANTHROPIC_API_KEY");
        assert!((config.planner.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.ui.tip_interval_ms, 2500);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: openai
  model: gpt-4o
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 8192
  timeout-ms: 60000

planner:
  temperature: 0.5
  max-tokens: 1024

ui:
  tip-interval-ms: 1000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 8192);
        assert!((config.planner.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.planner.max_tokens, 1024);
        assert_eq!(config.ui.tip_interval_ms, 1000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: claude-haiku
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "claude-haiku");
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.ui.tick_ms, 33);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snowball.yml");
        std::fs::write(&path, "llm:\n  model: test-model\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.llm.model, "test-model");
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let result = Config::load(Some(&PathBuf::from("/nonexistent/snowball.yml")));
        assert!(result.is_err());
    }
}
