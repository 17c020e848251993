//! Swap request model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chains a swap can originate from or settle on.
///
/// The set is closed: requests naming any other blockchain fail to
/// deserialize, so the orchestrator's dispatch is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blockchain {
    Cardano,
    Tron,
}

impl Blockchain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Blockchain::Cardano => "cardano",
            Blockchain::Tron => "tron",
        }
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a swap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapParty {
    /// Settlement address. Meaningful on the receiver; senders are resolved
    /// from the connected wallet.
    #[serde(default)]
    pub address: String,
    /// Decimal amount as entered by the user, e.g. "100" or "10.5"
    pub amount: String,
    pub ticker: String,
    pub blockchain: Blockchain,
}

/// Immutable swap input handed to the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub sender: SwapParty,
    pub receiver: SwapParty,
}
