//! Namada chain parameters and application feature flags
//!
//! This crate provides the chain identity, network presets and the
//! feature switches consumed by the transfer orchestration crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod features;
pub mod network;

pub use features::ApplicationFeatures;
pub use network::{ChainId, ChainParameters, NetworkType, NATIVE_TOKEN_SYMBOL};

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Invalid chain identifier
    #[error("Invalid chain ID: {0}")]
    InvalidChainId(String),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
