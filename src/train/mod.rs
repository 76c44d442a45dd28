pub mod trainer;

pub use trainer::{mean_absolute_error, train_epoch};
