pub mod toml_config;

use crate::adapters::http::{DEFAULT_API_BASE_URL, DEFAULT_API_FIELDS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_socket_addr,
    validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, Parser)]
#[command(name = "postal-lookup")]
#[command(about = "Looks up and caches postal-code formats per country")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on [default: 0.0.0.0:8080]")]
    pub bind: Option<String>,

    #[arg(long, help = "Base URL of the country lookup API")]
    pub api_base_url: Option<String>,

    #[arg(long, help = "Directory where fetched countries are stored [default: ./data]")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Timeout for upstream requests, in seconds")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, help = "Log output format: compact or json")]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings: defaults, then the TOML file, then explicit CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub api_base_url: String,
    pub api_fields: String,
    pub data_dir: String,
    pub request_timeout_secs: Option<u64>,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_fields: DEFAULT_API_FIELDS.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            request_timeout_secs: None,
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl ServiceConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = &cli.config {
            TomlConfig::from_file(path)?.apply_to(&mut config)?;
        }

        if let Some(bind) = &cli.bind {
            config.bind_address = bind.clone();
        }
        if let Some(base_url) = &cli.api_base_url {
            config.api_base_url = base_url.clone();
        }
        if let Some(data_dir) = &cli.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(timeout) = cli.request_timeout_secs {
            config.request_timeout_secs = Some(timeout);
        }
        if let Some(format) = cli.log_format {
            config.log_format = format;
        }
        config.verbose = cli.verbose;

        Ok(config)
    }
}

impl ConfigProvider for ServiceConfig {
    fn bind_address(&self) -> &str {
        &self.bind_address
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn api_fields(&self) -> &str {
        &self.api_fields
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        self.request_timeout_secs
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.bind_address)?;
        validate_url("upstream.base_url", &self.api_base_url)?;
        validate_non_empty_string("upstream.fields", &self.api_fields)?;
        validate_path("storage.data_dir", &self.data_dir)?;
        if let Some(timeout) = self.request_timeout_secs {
            validate_positive_number("upstream.timeout_seconds", timeout, 1)?;
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
    fn test_defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base_url(), "https://restcountries.com/v3.1/alpha");
        assert_eq!(config.api_fields(), "name,postalCode");
    }

    #[test]
    fn test_cli_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:9000\"\n\n[storage]\ndata_dir = \"/from/file\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "postal-lookup",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--data-dir",
            "/from/cli",
            "--log-format",
            "json",
            "-v",
        ]);
        let config = ServiceConfig::resolve(&cli).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.data_dir, "/from/cli");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliConfig::parse_from(["postal-lookup", "--config", "/nonexistent/postal.toml"]);
        assert!(ServiceConfig::resolve(&cli).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ServiceConfig {
            api_base_url: "ftp://example.com".to_string(),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            bind_address: "not-an-address".to_string(),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            request_timeout_secs: Some(0),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
