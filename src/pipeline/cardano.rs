//! Cardano swap pipeline
//!
//! State machine: generating -> building -> signing -> submitting ->
//! success/failed. Two documented stops terminate without a terminal status:
//! a build response with no transaction, and a two-party route whose build
//! response lacks the counter-signature.

use crate::builder::{
    AdaToMyUsdBuild, BuildService, CardanoBuildRequest, MyUsdToAdaBuild, RequestUtxo,
    StableSwapBuild,
};
use crate::config::Settings;
use crate::error::{SwapError, SwapResult};
use crate::metrics;
use crate::request::SwapRequest;
use crate::routes::Route;
use crate::status::{StatusReporter, SwapLinks, SwapStatus};
use crate::units;
use crate::wallet::CardanoWallet;

use std::sync::Arc;
use tracing::debug;

pub struct CardanoPipeline {
    wallet: Arc<dyn CardanoWallet>,
    builder: Arc<dyn BuildService>,
    reporter: StatusReporter,
    settings: Arc<Settings>,
}

impl CardanoPipeline {
    pub fn new(
        wallet: Arc<dyn CardanoWallet>,
        builder: Arc<dyn BuildService>,
        reporter: StatusReporter,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            wallet,
            builder,
            reporter,
            settings,
        }
    }

    /// Run the pipeline to its terminal status, or to a documented silent
    /// stop
    pub async fn run(&self, request: &SwapRequest) {
        match self.execute(request).await {
            Ok(Some(links)) => {
                metrics::record_swap_succeeded("cardano");
                self.reporter.succeed(links);
            }
            Ok(None) => {
                metrics::record_swap_abandoned("cardano");
                debug!("cardano swap stopped without a terminal status");
            }
            Err(error) => {
                metrics::record_swap_failed("cardano", error.kind());
                self.reporter.fail(&error);
            }
        }
    }

    async fn execute(&self, request: &SwapRequest) -> SwapResult<Option<SwapLinks>> {
        let address = self.wallet.address().ok_or(SwapError::WalletNotConnected)?;

        self.reporter.transition(SwapStatus::Generating);
        let utxos = self.wallet.utxos().await?;
        if utxos.is_empty() {
            return Err(SwapError::InsufficientUtxos);
        }

        self.reporter.transition(SwapStatus::Building);
        let mapped: Vec<RequestUtxo> = utxos.iter().map(RequestUtxo::from).collect();
        let route = Route::resolve(&request.sender.ticker, &request.receiver.ticker).ok_or_else(
            || SwapError::UnsupportedRoute {
                from: request.sender.ticker.clone(),
                to: request.receiver.ticker.clone(),
            },
        )?;
        let amount = units::to_base_units(&request.sender.amount)?;
        let payload = build_payload(route, address, mapped, amount, request);
        let built = self.builder.build_cardano(route, payload).await?;

        let tx = match built.tx {
            Some(tx) => tx,
            None => {
                debug!("build response carried no transaction");
                return Ok(None);
            }
        };

        self.reporter.transition(SwapStatus::Signing);
        if route.requires_countersignature() && built.signature.is_none() {
            debug!("build response missing the required counter-signature");
            return Ok(None);
        }
        let signed = self.wallet.sign(tx, built.signature).await?;

        self.reporter.transition(SwapStatus::Submitting);
        let tx_id = self.wallet.submit(signed).await?;

        Ok(Some(SwapLinks {
            transaction_url: self
                .settings
                .explorers
                .transaction_url(request.sender.blockchain, &tx_id),
            address_url: self
                .settings
                .explorers
                .address_url(request.receiver.blockchain, &request.receiver.address),
        }))
    }
}

fn build_payload(
    route: Route,
    address: String,
    utxos: Vec<RequestUtxo>,
    amount: u64,
    request: &SwapRequest,
) -> CardanoBuildRequest {
    match route {
        Route::AdaToMyUsd => CardanoBuildRequest::AdaToMyUsd(AdaToMyUsdBuild {
            address,
            utxos,
            ada_amount: amount.to_string(),
        }),
        Route::MyUsdToAda => CardanoBuildRequest::MyUsdToAda(MyUsdToAdaBuild {
            address,
            utxos,
            amount: amount.to_string(),
        }),
        Route::CardanoToStable { from, to } => CardanoBuildRequest::StableSwap(StableSwapBuild {
            address,
            utxos,
            amount_to_swap: amount.to_string(),
            destination_address: request.receiver.address.clone(),
            token_to_swap: from.ticker().to_string(),
            token_to_receive: to.ticker().to_string(),
        }),
    }
}
