//! Swap orchestration entry point
//!
//! The orchestrator owns the in-flight guard and the status channel, and
//! selects a chain pipeline from the sender blockchain. One swap runs at a
//! time; calls made while an attempt is in flight are dropped silently.

use crate::builder::BuildService;
use crate::config::Settings;
use crate::metrics;
use crate::pipeline::{CardanoPipeline, TronPipeline};
use crate::request::{Blockchain, SwapRequest};
use crate::status::{StatusReporter, SwapStatus};
use crate::wallet::{CardanoWallet, TronProvider};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

pub struct SwapOrchestrator {
    cardano: Arc<dyn CardanoWallet>,
    tron: Arc<dyn TronProvider>,
    builder: Arc<dyn BuildService>,
    reporter: StatusReporter,
    settings: Arc<Settings>,
    in_flight: AtomicBool,
}

impl SwapOrchestrator {
    /// Create an orchestrator over the injected chain capabilities
    pub fn new(
        settings: Settings,
        cardano: Arc<dyn CardanoWallet>,
        tron: Arc<dyn TronProvider>,
        builder: Arc<dyn BuildService>,
    ) -> Self {
        let reporter = StatusReporter::new(settings.messages.clone());
        Self {
            cardano,
            tron,
            builder,
            reporter,
            settings: Arc::new(settings),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Execute a swap request.
    ///
    /// Fire-and-forget from the caller's perspective: progress and the
    /// outcome are observed through [`subscribe`](Self::subscribe) and
    /// [`status`](Self::status). A call made while another swap is in
    /// flight is dropped without any status transition.
    pub async fn handle_swap(&self, request: SwapRequest) {
        // Claim the guard in one atomic step before the first suspension
        // point; InFlightGuard releases it on every exit path.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("swap already in flight, dropping request");
            return;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let attempt = Uuid::new_v4();
        let chain = request.sender.blockchain;
        info!(
            %attempt,
            chain = chain.as_str(),
            sender = %request.sender.ticker,
            receiver = %request.receiver.ticker,
            "starting swap"
        );
        metrics::record_swap_started(chain.as_str());

        match chain {
            Blockchain::Cardano => {
                CardanoPipeline::new(
                    self.cardano.clone(),
                    self.builder.clone(),
                    self.reporter.clone(),
                    self.settings.clone(),
                )
                .run(&request)
                .await
            }
            Blockchain::Tron => {
                TronPipeline::new(
                    self.tron.clone(),
                    self.builder.clone(),
                    self.reporter.clone(),
                    self.settings.clone(),
                )
                .run(&request)
                .await
            }
        }
    }

    /// Whether a swap is currently in flight
    pub fn is_swap_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Current status snapshot
    pub fn status(&self) -> SwapStatus {
        self.reporter.current()
    }

    /// Subscribe to every status transition
    pub fn subscribe(&self) -> broadcast::Receiver<SwapStatus> {
        self.reporter.subscribe()
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
