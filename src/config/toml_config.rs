use crate::config::ServiceConfig;
use crate::utils::error::{LookupError, Result};
use crate::utils::logger::LogFormat;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Settings file. Every key is optional; missing ones keep their defaults.
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:8080"
///
/// [upstream]
/// base_url = "https://restcountries.com/v3.1/alpha"
/// timeout_seconds = 10
///
/// [storage]
/// data_dir = "${DATA_ROOT}/postal-lookup"
///
/// [logging]
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: Option<String>,
    pub fields: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| LookupError::ConfigError {
            message: format!(
                "cannot read config file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Overlays every key present in the file onto `config`.
    pub fn apply_to(&self, config: &mut ServiceConfig) -> Result<()> {
        if let Some(bind) = &self.server.bind {
            config.bind_address = bind.clone();
        }
        if let Some(base_url) = &self.upstream.base_url {
            config.api_base_url = base_url.clone();
        }
        if let Some(fields) = &self.upstream.fields {
            config.api_fields = fields.clone();
        }
        if let Some(timeout) = self.upstream.timeout_seconds {
            config.request_timeout_secs = Some(timeout);
        }
        if let Some(data_dir) = &self.storage.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(format) = &self.logging.format {
            config.log_format =
                format
                    .parse::<LogFormat>()
                    .map_err(|reason| LookupError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.clone(),
                        reason,
                    })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:9000"

[upstream]
base_url = "https://countries.example.com/alpha"
timeout_seconds = 3

[storage]
data_dir = "/var/lib/postal-lookup"

[logging]
format = "json"
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = ServiceConfig::default();
        file.apply_to(&mut config).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.api_base_url, "https://countries.example.com/alpha");
        assert_eq!(config.request_timeout_secs, Some(3));
        assert_eq!(config.data_dir, "/var/lib/postal-lookup");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = TomlConfig::from_toml_str("[storage]\ndata_dir = \"./cache\"\n").unwrap();
        let mut config = ServiceConfig::default();
        file.apply_to(&mut config).unwrap();

        let defaults = ServiceConfig::default();
        assert_eq!(config.data_dir, "./cache");
        assert_eq!(config.bind_address, defaults.bind_address);
        assert_eq!(config.api_base_url, defaults.api_base_url);
        assert_eq!(config.api_fields, defaults.api_fields);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("POSTAL_LOOKUP_TEST_DATA_ROOT", "/srv/data");

        let file =
            TomlConfig::from_toml_str("[storage]\ndata_dir = \"${POSTAL_LOOKUP_TEST_DATA_ROOT}/countries\"\n")
                .unwrap();
        assert_eq!(file.storage.data_dir.as_deref(), Some("/srv/data/countries"));

        std::env::remove_var("POSTAL_LOOKUP_TEST_DATA_ROOT");
    }

    #[test]
    fn test_invalid_log_format() {
        let file = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        let mut config = ServiceConfig::default();

        assert!(matches!(
            file.apply_to(&mut config),
            Err(LookupError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[server\nbind = 1"),
            Err(LookupError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"0.0.0.0:8081\"\n")
            .unwrap();

        let file = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(file.server.bind.as_deref(), Some("0.0.0.0:8081"));
    }
}
