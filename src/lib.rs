pub mod activation;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::{sigmoid, sigmoid_derivative};
pub use error::{Error, Result};
pub use loss::MaeLoss;
pub use math::matrix::Matrix;
pub use network::{DiagnosticsConfig, Network, NetworkConfig};
pub use train::{mean_absolute_error, train_epoch};
