//! Model training and evaluation

pub mod metrics;
pub mod scaler;
pub mod trainer;

pub use scaler::StandardScaler;
pub use trainer::{train_and_predict, ModelOutcome};
