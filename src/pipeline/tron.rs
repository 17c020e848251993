//! Tron swap pipeline
//!
//! State machine: building -> signing -> success/failed. The balance check
//! happens inside the building phase; signing also broadcasts, so there is
//! no separate submitting phase.

use crate::builder::{BuildService, TronBuildRequest};
use crate::config::Settings;
use crate::error::{SwapError, SwapResult};
use crate::metrics;
use crate::request::SwapRequest;
use crate::routes::StableToken;
use crate::status::{StatusReporter, SwapLinks, SwapStatus};
use crate::units;
use crate::wallet::TronProvider;

use std::sync::Arc;
use tracing::debug;

pub struct TronPipeline {
    provider: Arc<dyn TronProvider>,
    builder: Arc<dyn BuildService>,
    reporter: StatusReporter,
    settings: Arc<Settings>,
}

impl TronPipeline {
    pub fn new(
        provider: Arc<dyn TronProvider>,
        builder: Arc<dyn BuildService>,
        reporter: StatusReporter,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            provider,
            builder,
            reporter,
            settings,
        }
    }

    /// Run the pipeline to its terminal status
    pub async fn run(&self, request: &SwapRequest) {
        match self.execute(request).await {
            Ok(links) => {
                metrics::record_swap_succeeded("tron");
                self.reporter.succeed(links);
            }
            Err(error) => {
                metrics::record_swap_failed("tron", error.kind());
                self.reporter.fail(&error);
            }
        }
    }

    async fn execute(&self, request: &SwapRequest) -> SwapResult<SwapLinks> {
        if self.provider.connected_address().is_none() {
            return Err(SwapError::WalletNotConnected);
        }

        self.reporter.transition(SwapStatus::Building);

        let token = StableToken::from_ticker(&request.sender.ticker).ok_or_else(|| {
            SwapError::UnsupportedRoute {
                from: request.sender.ticker.clone(),
                to: request.receiver.ticker.clone(),
            }
        })?;
        let token_config = self.settings.tron.token(token);

        let owner = self
            .provider
            .default_address()
            .ok_or(SwapError::WalletNotConnected)?;

        let balance = self.provider.trx_balance(&owner).await?;
        let minimum = self.settings.tron.minimum_balance;
        if balance < minimum * units::SUN_PER_TRX {
            debug!(balance, minimum, "balance below swap minimum");
            return Err(SwapError::InsufficientBalance {
                minimum_trx: minimum,
            });
        }

        let amount = units::to_base_units(&request.sender.amount)?;
        let built = self
            .builder
            .build_tron_transfer(TronBuildRequest {
                owner_address: owner,
                contract_address: token_config.contract_address.clone(),
                amount,
                destination: token_config.destination.clone(),
                receiver_address: request.receiver.address.clone(),
            })
            .await?;

        self.reporter.transition(SwapStatus::Signing);
        let tx_id = self.provider.sign_and_broadcast(&built).await?;

        Ok(SwapLinks {
            transaction_url: self
                .settings
                .explorers
                .transaction_url(request.sender.blockchain, &tx_id),
            address_url: self
                .settings
                .explorers
                .address_url(request.receiver.blockchain, &request.receiver.address),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MockBuildService;
    use crate::config::{test_settings, MessagesConfig};
    use crate::request::{Blockchain, SwapParty};
    use crate::wallet::{MockTronProvider, TronAddress};

    fn request(ticker: &str) -> SwapRequest {
        SwapRequest {
            sender: SwapParty {
                address: String::new(),
                amount: "10".to_string(),
                ticker: ticker.to_string(),
                blockchain: Blockchain::Tron,
            },
            receiver: SwapParty {
                address: "addr1receiver".to_string(),
                amount: "10".to_string(),
                ticker: "MyUSD".to_string(),
                blockchain: Blockchain::Cardano,
            },
        }
    }

    fn tron_address() -> TronAddress {
        TronAddress {
            base58: "TSender".to_string(),
            hex: "41abc".to_string(),
        }
    }

    fn pipeline(provider: MockTronProvider, builder: MockBuildService) -> TronPipeline {
        TronPipeline::new(
            Arc::new(provider),
            Arc::new(builder),
            StatusReporter::new(MessagesConfig::default()),
            Arc::new(test_settings()),
        )
    }

    #[tokio::test]
    async fn disconnected_wallet_fails_before_the_balance_check() {
        let mut provider = MockTronProvider::new();
        provider.expect_connected_address().return_const(None::<String>);
        provider.expect_trx_balance().times(0);

        let mut builder = MockBuildService::new();
        builder.expect_build_tron_transfer().times(0);

        let pipeline = pipeline(provider, builder);
        pipeline.run(&request("USDT")).await;

        match pipeline.reporter.current() {
            SwapStatus::Failed { message, .. } => assert_eq!(message, "Connect your Wallet"),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[tokio::test]
    async fn low_balance_fails_without_a_build_call() {
        let mut provider = MockTronProvider::new();
        provider
            .expect_connected_address()
            .return_const(Some("TSender".to_string()));
        provider
            .expect_default_address()
            .return_const(Some(tron_address()));
        // 5 TRX against a 10 TRX minimum
        provider.expect_trx_balance().returning(|_| Ok(5_000_000));

        let mut builder = MockBuildService::new();
        builder.expect_build_tron_transfer().times(0);

        let pipeline = pipeline(provider, builder);
        pipeline.run(&request("USDT")).await;

        match pipeline.reporter.current() {
            SwapStatus::Failed { detail, .. } => {
                assert_eq!(detail, "Minimum required balance is 10 TRX")
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[tokio::test]
    async fn usdc_swaps_use_the_usdc_contract() {
        let mut provider = MockTronProvider::new();
        provider
            .expect_connected_address()
            .return_const(Some("TSender".to_string()));
        provider
            .expect_default_address()
            .return_const(Some(tron_address()));
        provider.expect_trx_balance().returning(|_| Ok(50_000_000));
        provider
            .expect_sign_and_broadcast()
            .returning(|_| Ok("trontx1".to_string()));

        let mut builder = MockBuildService::new();
        builder
            .expect_build_tron_transfer()
            .withf(|request| {
                request.contract_address == "TUsdcContract"
                    && request.destination == "TUsdcDestination"
                    && request.amount == 10_000_000
            })
            .returning(|_| {
                Ok(crate::wallet::TronTransaction(serde_json::json!({
                    "raw_data": {}
                })))
            });

        let pipeline = pipeline(provider, builder);
        pipeline.run(&request("USDC")).await;

        match pipeline.reporter.current() {
            SwapStatus::Success {
                transaction_url, ..
            } => assert!(transaction_url.ends_with("/trontx1")),
            other => panic!("unexpected status: {:?}", other),
        }
    }
}
