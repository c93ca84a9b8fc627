use crate::utils::error::{LookupError, Result};
use regex::Regex;
use std::net::SocketAddr;
use std::sync::LazyLock;
use url::Url;

/// alpha-2 (`NL`), alpha-3 (`NLD`), numeric-3 (`528`) and IOC (`NED`) codes.
static COUNTRY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2,3}$").expect("country code pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Trims and uppercases `raw`, rejecting anything that cannot be a country code.
///
/// The result is safe to use as a storage key.
pub fn normalize_country_code(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LookupError::invalid_code(raw, "country code cannot be blank"));
    }

    let code = trimmed.to_ascii_uppercase();
    if !COUNTRY_CODE.is_match(&code) {
        return Err(LookupError::invalid_code(
            raw,
            "use one of the formats cca2, ccn3, cca3 or cioc (2 or 3 letters or digits)",
        ));
    }

    Ok(code)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LookupError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_country_code() {
        assert_eq!(normalize_country_code("NL").unwrap(), "NL");
        assert_eq!(normalize_country_code(" nl ").unwrap(), "NL");
        assert_eq!(normalize_country_code("nld").unwrap(), "NLD");
        assert_eq!(normalize_country_code("528").unwrap(), "528");
    }

    #[test]
    fn test_normalize_country_code_rejects_bad_input() {
        assert!(normalize_country_code("").is_err());
        assert!(normalize_country_code("   ").is_err());
        assert!(normalize_country_code("N").is_err());
        assert!(normalize_country_code("JaspersImperium").is_err());
        assert!(normalize_country_code("../etc").is_err());
        assert!(normalize_country_code("N L").is_err());

        match normalize_country_code("JaspersImperium") {
            Err(LookupError::InvalidCountryCode { code, .. }) => {
                assert_eq!(code, "JaspersImperium")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("upstream.base_url", "https://restcountries.com/v3.1/alpha").is_ok());
        assert!(validate_url("upstream.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("upstream.base_url", "").is_err());
        assert!(validate_url("upstream.base_url", "invalid-url").is_err());
        assert!(validate_url("upstream.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("server.bind", "127.0.0.1:8080").is_ok());
        assert!(validate_socket_addr("server.bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("upstream.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("upstream.timeout_seconds", 0, 1).is_err());
    }
}
