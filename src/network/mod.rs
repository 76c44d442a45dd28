pub mod config;
mod diagnostics;
pub mod network;

pub use config::{DiagnosticsConfig, NetworkConfig, DEFAULT_LOG_FREQUENCY};
pub use network::Network;
