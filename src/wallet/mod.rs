//! Wallet capability seams
//!
//! The engine never reaches for ambient wallet objects; hosts inject these
//! traits at orchestrator construction. Implementations wrap the actual
//! chain SDKs (a Lucid-style context for Cardano, the page-injected provider
//! for Tron) and are substituted with doubles in tests.

use crate::error::SwapResult;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An unspent transaction output held by the Cardano wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utxo {
    pub tx_hash: String,
    pub output_index: u32,
    pub address: String,
    /// Asset unit ("lovelace" or policy id + asset name) to quantity
    pub assets: BTreeMap<String, u64>,
}

/// Connected Tron account address in both encodings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TronAddress {
    pub base58: String,
    pub hex: String,
}

/// Opaque contract-call transaction produced by the build service,
/// consumed exactly once by the signing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TronTransaction(pub serde_json::Value);

/// Cardano wallet capabilities: UTXO query, signing/assembly, submission
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CardanoWallet: Send + Sync {
    /// Address of the active wallet session, if one is connected
    fn address(&self) -> Option<String>;

    /// Spendable UTXOs held by the wallet
    async fn utxos(&self) -> SwapResult<Vec<Utxo>>;

    /// Sign `tx`, assembling with `counter_signature` when present, and
    /// return the finalized transaction
    async fn sign(&self, tx: String, counter_signature: Option<String>) -> SwapResult<String>;

    /// Submit a finalized transaction to the network and return its id
    async fn submit(&self, signed_tx: String) -> SwapResult<String>;
}

/// Tron wallet provider capabilities: account access, balance query,
/// signing/broadcast
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TronProvider: Send + Sync {
    /// Address of the connected Tron session, if any
    fn connected_address(&self) -> Option<String>;

    /// Default account exposed by the provider, if available
    fn default_address(&self) -> Option<TronAddress>;

    /// Native-token balance of `address`, in SUN
    async fn trx_balance(&self, address: &TronAddress) -> SwapResult<u64>;

    /// Sign a built transaction, broadcast it, and return its id
    async fn sign_and_broadcast(&self, tx: &TronTransaction) -> SwapResult<String>;
}
