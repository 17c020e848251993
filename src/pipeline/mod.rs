//! Chain-specific swap pipelines
//!
//! Each pipeline drives one chain's build/sign/submit protocol and reports
//! progress through the shared status channel:
//! - Cardano: UTXO collection, route resolution, remote build, collaborative
//!   signing/assembly, submission
//! - Tron: balance verification, remote contract-call build, wallet signing
//!   and broadcast

mod cardano;
mod tron;

pub use cardano::CardanoPipeline;
pub use tron::TronPipeline;
