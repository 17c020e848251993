//! Prometheus metrics for swap outcomes
//!
//! The engine registers counters on the default registry; embedding hosts
//! expose them however they serve metrics (see [`gather`]).

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

lazy_static! {
    pub static ref SWAPS_STARTED: CounterVec = register_counter_vec!(
        "mynth_swaps_started_total",
        "Total swap attempts entering a pipeline",
        &["chain"]
    )
    .unwrap();

    pub static ref SWAPS_SUCCEEDED: CounterVec = register_counter_vec!(
        "mynth_swaps_succeeded_total",
        "Total swap attempts reaching a success status",
        &["chain"]
    )
    .unwrap();

    pub static ref SWAPS_FAILED: CounterVec = register_counter_vec!(
        "mynth_swaps_failed_total",
        "Total failed swap attempts by error kind",
        &["chain", "kind"]
    )
    .unwrap();

    pub static ref SWAPS_ABANDONED: CounterVec = register_counter_vec!(
        "mynth_swaps_abandoned_total",
        "Total swap attempts stopped without a terminal status",
        &["chain"]
    )
    .unwrap();
}

// Helper functions to record metrics

pub fn record_swap_started(chain: &str) {
    SWAPS_STARTED.with_label_values(&[chain]).inc();
}

pub fn record_swap_succeeded(chain: &str) {
    SWAPS_SUCCEEDED.with_label_values(&[chain]).inc();
}

pub fn record_swap_failed(chain: &str, kind: &str) {
    SWAPS_FAILED.with_label_values(&[chain, kind]).inc();
}

pub fn record_swap_abandoned(chain: &str) {
    SWAPS_ABANDONED.with_label_values(&[chain]).inc();
}

/// Render all registered metrics in the Prometheus text format
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("metrics encode");
    String::from_utf8(buffer).expect("metrics are utf8")
}
