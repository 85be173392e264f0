use serde::{Deserialize, Serialize};

pub const ENV_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const ENV_MODEL_ID: &str = "AI_MODEL_ID";
pub const ENV_API_KEY: &str = "AI_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
    #[serde(default)]
    pub cors: bool,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
            cors: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(alias = "accountid", default)]
    pub account_id: String,
    #[serde(alias = "modelid", default)]
    pub model_id: String,
    #[serde(alias = "apikey", default)]
    pub api_key: String,
    #[serde(alias = "apibase", default = "default_api_base")]
    pub api_base: String,
    /// Outbound request timeout. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            model_id: String::new(),
            api_key: String::new(),
            api_base: default_api_base(),
            timeout_secs: None,
        }
    }
}

fn default_port() -> String {
    "8787".to_string()
}

fn default_api_base() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load the config file if one was given, then let the environment
    /// override provider settings, then check that nothing required is
    /// missing.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.check()?;
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = &mut self.provider;
        for (name, field) in [
            (ENV_ACCOUNT_ID, &mut provider.account_id),
            (ENV_MODEL_ID, &mut provider.model_id),
            (ENV_API_KEY, &mut provider.api_key),
        ] {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        let provider = &self.provider;
        for (name, value) in [
            ("provider.account_id", &provider.account_id),
            ("provider.model_id", &provider.model_id),
            ("provider.api_key", &provider.api_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }
        if self.listen.tlscert.is_some() != self.listen.tlskey.is_some() {
            return Err(ConfigError::Invalid(
                "listen.tlscert and listen.tlskey must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Missing required setting {0}")]
    Missing(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
            listen:
              port: "9000"
              cors: true
            provider:
              account_id: abc123
              model_id: "@cf/meta/llama-3.1-8b-instruct"
              api_key: secret
              timeout_secs: 30
        "#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.listen.port, "9000");
        assert!(config.listen.cors);
        assert_eq!(config.provider.account_id, "abc123");
        assert_eq!(config.provider.api_base, "https://api.cloudflare.com/client/v4");
        assert_eq!(config.provider.timeout_secs, Some(30));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.listen.port, "8787");
        assert!(!config.listen.cors);
        assert!(matches!(
            config.check(),
            Err(ConfigError::Missing("provider.account_id"))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ACCOUNT_ID, "from-env"),
            (ENV_MODEL_ID, "@cf/model"),
            (ENV_API_KEY, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::from_yaml("provider:\n  api_key: from-file\n").unwrap();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.provider.account_id, "from-env");
        assert_eq!(config.provider.model_id, "@cf/model");
        // empty variables do not clobber the file
        assert_eq!(config.provider.api_key, "from-file");
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_tls_pair_required() {
        let mut config = Config::default();
        config.apply_env(|_| Some("x".to_string()));
        config.listen.tlscert = Some("cert.pem".to_string());
        assert!(matches!(config.check(), Err(ConfigError::Invalid(_))));
    }
}
