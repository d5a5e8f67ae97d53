//! CLI configuration.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use pos_client::{ClientConfig, DEFAULT_BASE_URL};
use pos_core::cart::{rule_for_percent, TaxRule};
use pos_core::Currency;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "POS_API_URL";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Service connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Sale defaults.
    #[serde(default)]
    pub sales: SalesConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text, choosing the format by file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `POS_API_URL` if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url(std::env::var(API_URL_ENV).ok())
    }

    fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// Connection settings for the REST client.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api.base_url.clone());
        match self.api.timeout_secs {
            Some(secs) if secs > 0 => config.with_timeout(Duration::from_secs(secs)),
            _ => config,
        }
    }

    /// Configured sale currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.sales.currency)
            .ok_or_else(|| anyhow!("Unknown currency in sales.currency: {}", self.sales.currency))
    }

    /// Configured tax rule.
    pub fn tax_rule(&self) -> Result<Box<dyn TaxRule>> {
        rule_for_percent(self.sales.tax_rate_percent)
            .with_context(|| format!("Invalid sales.tax_rate_percent: {}", self.sales.tax_rate_percent))
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("api.base_url must be an http(s) URL, got '{}'", url));
        }
        if let Err(e) = self.currency() {
            errors.push(e.to_string());
        }
        if let Err(e) = self.tax_rule() {
            errors.push(format!("{:#}", e));
        }
        errors
    }
}

/// Service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Service root URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Unset or 0 waits for the transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Sale defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Flat tax rate applied to the subtotal.
    #[serde(default)]
    pub tax_rate_percent: f64,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            tax_rate_percent: 0.0,
        }
    }
}

/// Generate a default pos.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Point of sale configuration

[api]
base_url = "{base_url}"
# timeout_secs = 30

[sales]
currency = "COP"
tax_rate_percent = 0
"#,
        base_url = DEFAULT_BASE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = CliConfig::parse("pos.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = CliConfig::parse("pos.toml", "[sales]\ntax_rate_percent = 19\n").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.sales.currency, "COP");
        let rule = config.tax_rule().unwrap();
        let taxes = rule.taxes(pos_core::Money::new(1000, Currency::COP));
        assert_eq!(taxes.amount_minor, 190);
    }

    #[test]
    fn test_json_by_extension() {
        let config = CliConfig::parse(
            "pos.json",
            r#"{"api": {"base_url": "http://inventory:8080/api", "timeout_secs": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://inventory:8080/api");
        assert_eq!(config.client_config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let mut config = CliConfig::default();
        config.api.timeout_secs = Some(0);
        assert_eq!(config.client_config().timeout, None);
    }

    #[test]
    fn test_api_url_override() {
        let config = CliConfig::default().with_api_url(Some(" http://other/api ".to_string()));
        assert_eq!(config.api.base_url, "http://other/api");
        let config = CliConfig::default().with_api_url(Some("  ".to_string()));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = CliConfig::default();
        config.api.base_url = "inventory".to_string();
        config.sales.currency = "XXX".to_string();
        config.sales.tax_rate_percent = -1.0;
        assert_eq!(config.validate().len(), 3);
        assert!(config.currency().is_err());
    }
}
