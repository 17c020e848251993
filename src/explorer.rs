//! Explorer link construction for terminal swap status
//!
//! A completed swap reports a sender-chain transaction link and a
//! receiver-chain address link; the URL bases are configuration.

use crate::request::Blockchain;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorersConfig {
    pub cardano: ExplorerUrls,
    pub tron: ExplorerUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerUrls {
    pub transaction: String,
    pub address: String,
}

impl Default for ExplorersConfig {
    fn default() -> Self {
        Self {
            cardano: ExplorerUrls {
                transaction: "https://cardanoscan.io/transaction".to_string(),
                address: "https://cardanoscan.io/address".to_string(),
            },
            tron: ExplorerUrls {
                transaction: "https://tronscan.org/#/transaction".to_string(),
                address: "https://tronscan.org/#/address".to_string(),
            },
        }
    }
}

impl ExplorersConfig {
    fn for_chain(&self, chain: Blockchain) -> &ExplorerUrls {
        match chain {
            Blockchain::Cardano => &self.cardano,
            Blockchain::Tron => &self.tron,
        }
    }

    /// Explorer link for a submitted transaction
    pub fn transaction_url(&self, chain: Blockchain, tx_id: &str) -> String {
        format!(
            "{}/{}",
            self.for_chain(chain).transaction.trim_end_matches('/'),
            tx_id
        )
    }

    /// Explorer link for an account address
    pub fn address_url(&self, chain: Blockchain, address: &str) -> String {
        format!(
            "{}/{}",
            self.for_chain(chain).address.trim_end_matches('/'),
            address
        )
    }
}
