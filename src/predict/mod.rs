//! Prediction assembly
//!
//! Confidence estimation and the request orchestrator.

pub mod confidence;
pub mod service;

pub use confidence::{estimate, ConfidenceBand};
pub use service::{PredictionReport, PredictionService};
