//! Error types for the swap engine
//!
//! Every failure site constructs a tagged [`SwapError`] variant, so reporting
//! switches on a closed set of kinds. Remote error bodies are coerced to a
//! detail string exactly once, at the HTTP boundary.

use crate::config::MessagesConfig;
use serde_json::Value;
use thiserror::Error;

/// Main error type for swap pipelines
#[derive(Error, Debug)]
pub enum SwapError {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("no spendable UTXOs available")]
    InsufficientUtxos,

    #[error("balance below the {minimum_trx} TRX minimum")]
    InsufficientBalance { minimum_trx: u64 },

    #[error("no swap route from {from} to {to}")]
    UnsupportedRoute { from: String, to: String },

    #[error("build request failed: {detail}")]
    Build { detail: String },

    #[error("signing failed: {0}")]
    Sign(String),

    #[error("submission failed: {0}")]
    Submit(String),

    #[error("invalid amount: {0}")]
    Amount(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SwapError {
    /// Stable kind label for metrics and logging
    pub fn kind(&self) -> &'static str {
        match self {
            SwapError::WalletNotConnected => "wallet_not_connected",
            SwapError::InsufficientUtxos => "insufficient_utxos",
            SwapError::InsufficientBalance { .. } => "insufficient_balance",
            SwapError::UnsupportedRoute { .. } => "unsupported_route",
            SwapError::Build { .. } => "build_failed",
            SwapError::Sign(_) => "sign_failed",
            SwapError::Submit(_) => "submit_failed",
            SwapError::Amount(_) => "invalid_amount",
            SwapError::Config(_) => "config",
            SwapError::Internal(_) => "internal",
        }
    }

    /// Short user-facing title shown in the failed status
    pub fn title(&self) -> &'static str {
        match self {
            SwapError::WalletNotConnected => "Connect your Wallet",
            SwapError::InsufficientUtxos => "Insufficient UTXOs",
            SwapError::InsufficientBalance { .. } => "Insufficient balance",
            SwapError::UnsupportedRoute { .. } => "Unavailable swap",
            SwapError::Build { .. } | SwapError::Sign(_) => "Cannot assemble transaction",
            SwapError::Submit(_)
            | SwapError::Amount(_)
            | SwapError::Config(_)
            | SwapError::Internal(_) => "Swap failed",
        }
    }

    /// Longer user-facing detail, honoring configured message overrides
    pub fn detail(&self, messages: &MessagesConfig) -> String {
        match self {
            SwapError::WalletNotConnected => messages.wallet_unconnected.clone(),
            SwapError::InsufficientUtxos => messages.insufficient_utxos.clone(),
            SwapError::InsufficientBalance { minimum_trx } => {
                format!("Minimum required balance is {} TRX", minimum_trx)
            }
            SwapError::UnsupportedRoute { from, to } => format!(
                "Swap of {} to {} is not available at this time, try again later",
                from, to
            ),
            SwapError::Build { detail } => detail.clone(),
            SwapError::Sign(detail)
            | SwapError::Submit(detail)
            | SwapError::Amount(detail)
            | SwapError::Config(detail)
            | SwapError::Internal(detail) => detail.clone(),
        }
    }

    /// Build a [`SwapError::Build`] from a non-2xx response body
    pub fn build_from_body(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<Value>(body) {
            Ok(value) => remote_detail(&value),
            Err(_) if !body.is_empty() => body.to_string(),
            Err(_) => format!("build service returned status {}", status),
        };
        SwapError::Build { detail }
    }

    /// Build a [`SwapError::Build`] from a `{ ok: false, error }` envelope
    pub fn build_from_remote(error: Option<Value>) -> Self {
        let detail = error
            .as_ref()
            .map(remote_detail)
            .unwrap_or_else(|| "build service reported failure".to_string());
        SwapError::Build { detail }
    }
}

/// Coerce a remote error body into a readable detail string.
///
/// Bodies arrive as a bare string, an `{ "info": ... }` object, or an
/// arbitrary structured payload.
pub(crate) fn remote_detail(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("info")
            .or_else(|| map.get("message"))
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// Result type for swap operations
pub type SwapResult<T> = Result<T, SwapError>;
