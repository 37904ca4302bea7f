//! Feature engineering
//!
//! Converts a raw game log into model-ready feature rows and enriches
//! them with opponent reference data.

pub mod builder;
pub mod enrich;

pub use builder::{build_features, FeatureRow};
pub use enrich::OpponentEnricher;
