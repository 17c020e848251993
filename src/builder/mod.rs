//! Remote transaction build service
//!
//! The build service assembles swap transactions server-side. Cardano routes
//! post the wallet's UTXO set and receive a transaction to sign (plus a
//! counter-signature on two-party routes); the Tron route receives a
//! contract-call transaction wrapped in an `{ ok, data, error }` envelope.

mod http;

pub use http::HttpBuildService;

use crate::error::SwapResult;
use crate::routes::Route;
use crate::wallet::{TronAddress, TronTransaction, Utxo};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// One UTXO in the build request wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUtxo {
    pub tx_hash: String,
    pub output_index: u32,
    pub address: String,
    pub assets: Vec<RequestAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestAsset {
    pub unit: String,
    pub quantity: String,
}

impl From<&Utxo> for RequestUtxo {
    fn from(utxo: &Utxo) -> Self {
        Self {
            tx_hash: utxo.tx_hash.clone(),
            output_index: utxo.output_index,
            address: utxo.address.clone(),
            assets: utxo
                .assets
                .iter()
                .map(|(unit, quantity)| RequestAsset {
                    unit: unit.clone(),
                    quantity: quantity.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaToMyUsdBuild {
    pub address: String,
    pub utxos: Vec<RequestUtxo>,
    pub ada_amount: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyUsdToAdaBuild {
    pub address: String,
    pub utxos: Vec<RequestUtxo>,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StableSwapBuild {
    pub address: String,
    pub utxos: Vec<RequestUtxo>,
    pub amount_to_swap: String,
    pub destination_address: String,
    pub token_to_swap: String,
    pub token_to_receive: String,
}

/// Route-specific Cardano build payload
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CardanoBuildRequest {
    AdaToMyUsd(AdaToMyUsdBuild),
    MyUsdToAda(MyUsdToAdaBuild),
    StableSwap(StableSwapBuild),
}

/// Build response for Cardano routes
#[derive(Debug, Clone, Deserialize)]
pub struct CardanoBuildResponse {
    /// Serialized transaction to load into the wallet context
    #[serde(default)]
    pub tx: Option<String>,
    /// Counter-signature for two-party assembly, when the route uses one
    #[serde(default)]
    pub signature: Option<String>,
}

/// Contract-call build request for the Tron route
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TronBuildRequest {
    pub owner_address: TronAddress,
    pub contract_address: String,
    /// Token amount in base units
    pub amount: u64,
    pub destination: String,
    pub receiver_address: String,
}

/// Wire envelope returned by the Tron build endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TronBuildEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub data: Option<TronTransaction>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Remote build service seam
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Request a transaction build for a Cardano route
    async fn build_cardano(
        &self,
        route: Route,
        request: CardanoBuildRequest,
    ) -> SwapResult<CardanoBuildResponse>;

    /// Request a contract-call transaction for the Tron route
    async fn build_tron_transfer(&self, request: TronBuildRequest) -> SwapResult<TronTransaction>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn utxos_map_to_the_wire_shape() {
        let mut assets = BTreeMap::new();
        assets.insert("lovelace".to_string(), 2_000_000u64);
        assets.insert("abc123.MyUSD".to_string(), 50u64);
        let utxo = Utxo {
            tx_hash: "deadbeef".to_string(),
            output_index: 1,
            address: "addr1xyz".to_string(),
            assets,
        };

        let mapped = RequestUtxo::from(&utxo);
        let json = serde_json::to_value(&mapped).unwrap();
        assert_eq!(json["txHash"], "deadbeef");
        assert_eq!(json["outputIndex"], 1);
        // Quantities travel as strings
        assert_eq!(json["assets"][1]["unit"], "lovelace");
        assert_eq!(json["assets"][1]["quantity"], "2000000");
    }

    #[test]
    fn build_payloads_use_the_expected_keys() {
        let payload = CardanoBuildRequest::StableSwap(StableSwapBuild {
            address: "addr1".to_string(),
            utxos: vec![],
            amount_to_swap: "100000000".to_string(),
            destination_address: "TDest".to_string(),
            token_to_swap: "MyUSD".to_string(),
            token_to_receive: "USDT".to_string(),
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["amountToSwap"], "100000000");
        assert_eq!(json["destinationAddress"], "TDest");
        assert_eq!(json["tokenToSwap"], "MyUSD");
        assert_eq!(json["tokenToReceive"], "USDT");

        let payload = CardanoBuildRequest::AdaToMyUsd(AdaToMyUsdBuild {
            address: "addr1".to_string(),
            utxos: vec![],
            ada_amount: "100000000".to_string(),
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["adaAmount"], "100000000");
    }

    #[test]
    fn tron_envelope_tolerates_missing_fields() {
        let envelope: TronBuildEnvelope =
            serde_json::from_str(r#"{ "ok": false, "error": "no liquidity" }"#).unwrap();
        assert!(!envelope.ok);
        assert!(envelope.data.is_none());

        let envelope: TronBuildEnvelope =
            serde_json::from_str(r#"{ "ok": true, "data": { "raw_data": {} } }"#).unwrap();
        assert!(envelope.ok);
        assert!(envelope.data.is_some());
    }
}
