//! Configuration for the swap engine
//!
//! Loads settings from TOML files with environment variable substitution.
//! The resolved [`Settings`] value is handed to the orchestrator at
//! construction; nothing is cached in process-wide state.

use crate::explorer::ExplorersConfig;
use crate::routes::StableToken;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub tron: TronConfig,
    #[serde(default)]
    pub explorers: ExplorersConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the remote transaction build service
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TronConfig {
    pub usdt: TronTokenConfig,
    pub usdc: TronTokenConfig,
    /// Minimum TRX balance required before a swap is attempted
    pub minimum_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TronTokenConfig {
    pub contract_address: String,
    pub destination: String,
}

/// User-facing failure messages, overridable per deployment
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub wallet_unconnected: String,
    pub insufficient_utxos: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            wallet_unconnected: "Error".to_string(),
            insufficient_utxos: "Error".to_string(),
        }
    }
}

impl TronConfig {
    /// Contract and destination addresses for a stablecoin
    pub fn token(&self, token: StableToken) -> &TronTokenConfig {
        match token {
            StableToken::Usdt => &self.usdt,
            StableToken::Usdc => &self.usdc,
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = env::var("MYNTH_SWAP_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/default.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml(&config_str)
    }

    /// Parse settings from a TOML string, substituting `${VAR}` references
    pub fn from_toml(input: &str) -> Result<Self> {
        let config_str = substitute_env_vars(input);

        let settings: Settings =
            toml::from_str(&config_str).with_context(|| "Failed to parse configuration")?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.backend.base_url.is_empty() {
            anyhow::bail!("backend.base_url must be set");
        }

        for (name, token) in [("usdt", &self.tron.usdt), ("usdc", &self.tron.usdc)] {
            if token.contract_address.is_empty() {
                anyhow::bail!("tron.{}.contract_address must be set", name);
            }
            if token.destination.is_empty() {
                anyhow::bail!("tron.{}.destination must be set", name);
            }
        }

        Ok(())
    }
}

/// Substitute environment variables in the format ${VAR_NAME}
fn substitute_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        let var_value = env::var(var_name).unwrap_or_default();
        result = result.replace(&cap[0], &var_value);
    }

    result
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings::from_toml(
        r#"
        [backend]
        base_url = "https://build.example.com"

        [tron]
        minimum_balance = 10

        [tron.usdt]
        contract_address = "TUsdtContract"
        destination = "TUsdtDestination"

        [tron.usdc]
        contract_address = "TUsdcContract"
        destination = "TUsdcDestination"
        "#,
    )
    .expect("test settings parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_substitution() {
        env::set_var("TEST_VAR", "test_value");
        let input = "url = \"https://api.example.com/${TEST_VAR}/endpoint\"";
        let result = substitute_env_vars(input);
        assert_eq!(result, "url = \"https://api.example.com/test_value/endpoint\"");
    }

    #[test]
    fn parses_a_full_settings_file() {
        let settings = test_settings();
        assert_eq!(settings.backend.base_url, "https://build.example.com");
        assert_eq!(settings.tron.minimum_balance, 10);
        assert_eq!(
            settings.tron.token(StableToken::Usdc).contract_address,
            "TUsdcContract"
        );
        // Sections without explicit values fall back to defaults
        assert_eq!(settings.messages.wallet_unconnected, "Error");
        assert!(settings
            .explorers
            .transaction_url(crate::request::Blockchain::Cardano, "tx")
            .starts_with("https://cardanoscan.io"));
    }

    #[test]
    fn rejects_incomplete_settings() {
        let missing_contract = r#"
            [backend]
            base_url = "https://build.example.com"

            [tron]
            minimum_balance = 10

            [tron.usdt]
            contract_address = ""
            destination = "TDest"

            [tron.usdc]
            contract_address = "TContract"
            destination = "TDest"
        "#;
        assert!(Settings::from_toml(missing_contract).is_err());

        let empty_base_url = r#"
            [backend]
            base_url = ""

            [tron]
            minimum_balance = 10

            [tron.usdt]
            contract_address = "TContract"
            destination = "TDest"

            [tron.usdc]
            contract_address = "TContract"
            destination = "TDest"
        "#;
        assert!(Settings::from_toml(empty_base_url).is_err());
    }
}
