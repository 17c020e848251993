//! Swap progress reporting
//!
//! The reporter broadcasts every state transition and keeps a snapshot of
//! the current state for pull-style consumers. `fail` is the single
//! reporting path for every pipeline failure.

use crate::config::MessagesConfig;
use crate::error::SwapError;

use serde::Serialize;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Observable swap lifecycle state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SwapStatus {
    Idle,
    Generating,
    Building,
    Signing,
    Submitting,
    Success {
        transaction_url: String,
        address_url: String,
    },
    Failed {
        message: String,
        detail: String,
    },
}

impl SwapStatus {
    /// Status label for logging and assertions
    pub fn name(&self) -> &'static str {
        match self {
            SwapStatus::Idle => "idle",
            SwapStatus::Generating => "generating",
            SwapStatus::Building => "building",
            SwapStatus::Signing => "signing",
            SwapStatus::Submitting => "submitting",
            SwapStatus::Success { .. } => "success",
            SwapStatus::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStatus::Success { .. } | SwapStatus::Failed { .. })
    }
}

/// Confirmation links carried by a successful swap
#[derive(Debug, Clone, PartialEq)]
pub struct SwapLinks {
    pub transaction_url: String,
    pub address_url: String,
}

/// Status channel shared between the orchestrator, its pipelines, and
/// observers
#[derive(Clone)]
pub struct StatusReporter {
    tx: broadcast::Sender<SwapStatus>,
    current: Arc<RwLock<SwapStatus>>,
    messages: Arc<MessagesConfig>,
}

impl StatusReporter {
    pub fn new(messages: MessagesConfig) -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            tx,
            current: Arc::new(RwLock::new(SwapStatus::Idle)),
            messages: Arc::new(messages),
        }
    }

    /// Record and broadcast a state transition
    pub fn transition(&self, status: SwapStatus) {
        debug!(status = status.name(), "swap status transition");
        *self.current.write().expect("status lock poisoned") = status.clone();
        let _ = self.tx.send(status);
    }

    pub fn succeed(&self, links: SwapLinks) {
        info!(transaction = %links.transaction_url, "swap completed");
        self.transition(SwapStatus::Success {
            transaction_url: links.transaction_url,
            address_url: links.address_url,
        });
    }

    /// Report a failure as the terminal status
    pub fn fail(&self, error: &SwapError) {
        warn!(kind = error.kind(), %error, "swap failed");
        self.transition(SwapStatus::Failed {
            message: error.title().to_string(),
            detail: error.detail(&self.messages),
        });
    }

    /// Subscribe to every subsequent transition
    pub fn subscribe(&self) -> broadcast::Receiver<SwapStatus> {
        self.tx.subscribe()
    }

    /// Current state snapshot
    pub fn current(&self) -> SwapStatus {
        self.current.read().expect("status lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_update_snapshot_and_reach_subscribers() {
        let reporter = StatusReporter::new(MessagesConfig::default());
        assert_eq!(reporter.current(), SwapStatus::Idle);

        let mut rx = reporter.subscribe();
        reporter.transition(SwapStatus::Generating);
        reporter.transition(SwapStatus::Building);

        assert_eq!(reporter.current(), SwapStatus::Building);
        assert_eq!(rx.try_recv().unwrap(), SwapStatus::Generating);
        assert_eq!(rx.try_recv().unwrap(), SwapStatus::Building);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn failures_map_through_the_message_table() {
        let reporter = StatusReporter::new(MessagesConfig {
            wallet_unconnected: "Open the wallet first".to_string(),
            ..MessagesConfig::default()
        });
        reporter.fail(&SwapError::WalletNotConnected);

        match reporter.current() {
            SwapStatus::Failed { message, detail } => {
                assert_eq!(message, "Connect your Wallet");
                assert_eq!(detail, "Open the wallet first");
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn terminal_states_are_flagged() {
        assert!(SwapStatus::Success {
            transaction_url: String::new(),
            address_url: String::new(),
        }
        .is_terminal());
        assert!(SwapStatus::Failed {
            message: String::new(),
            detail: String::new(),
        }
        .is_terminal());
        assert!(!SwapStatus::Signing.is_terminal());
        assert!(!SwapStatus::Idle.is_terminal());
    }
}
