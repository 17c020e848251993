//! Supported swap routes
//!
//! A route is a pure function of the (sender ticker, receiver ticker) pair.
//! It decides the build endpoint, the payload shape, and whether the remote
//! service must co-sign the transaction. Resolution never touches the
//! network; an unmatched pair is a terminal "unavailable swap".

/// Cardano-native tokens that can be bridged out to Tron stablecoins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardanoToken {
    MyUsd,
    Iag,
}

impl CardanoToken {
    pub fn ticker(&self) -> &'static str {
        match self {
            CardanoToken::MyUsd => "MyUSD",
            CardanoToken::Iag => "IAG",
        }
    }
}

/// Tron stablecoins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StableToken {
    Usdt,
    Usdc,
}

impl StableToken {
    pub fn ticker(&self) -> &'static str {
        match self {
            StableToken::Usdt => "USDT",
            StableToken::Usdc => "USDC",
        }
    }

    pub fn from_ticker(ticker: &str) -> Option<Self> {
        match ticker {
            "USDT" => Some(StableToken::Usdt),
            "USDC" => Some(StableToken::Usdc),
            _ => None,
        }
    }
}

/// A supported (source asset, destination asset) pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// ADA into MyUSD, service-signed only
    AdaToMyUsd,
    /// MyUSD back into ADA, service-signed only
    MyUsdToAda,
    /// Cardano token out to a Tron stablecoin; requires two-party assembly
    CardanoToStable {
        from: CardanoToken,
        to: StableToken,
    },
}

impl Route {
    /// Match a ticker pair against the supported table
    pub fn resolve(sender_ticker: &str, receiver_ticker: &str) -> Option<Route> {
        match (sender_ticker, receiver_ticker) {
            ("ADA", "MyUSD") => Some(Route::AdaToMyUsd),
            ("MyUSD", "ADA") => Some(Route::MyUsdToAda),
            (sender, receiver) => {
                let from = match sender {
                    "MyUSD" => CardanoToken::MyUsd,
                    "IAG" => CardanoToken::Iag,
                    _ => return None,
                };
                let to = StableToken::from_ticker(receiver)?;
                Some(Route::CardanoToStable { from, to })
            }
        }
    }

    /// Build endpoint path, relative to the backend base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Route::AdaToMyUsd => "swap-ada/build",
            Route::MyUsdToAda => "swap-myusd-ada/build",
            Route::CardanoToStable { .. } => "swap/build",
        }
    }

    /// Whether the build response must carry a counter-signature for
    /// two-party assembly
    pub fn requires_countersignature(&self) -> bool {
        matches!(self, Route::CardanoToStable { .. })
    }

    /// Route label for logging
    pub fn name(&self) -> &'static str {
        match self {
            Route::AdaToMyUsd => "ada-myusd",
            Route::MyUsdToAda => "myusd-ada",
            Route::CardanoToStable { .. } => "cardano-stable",
        }
    }
}
