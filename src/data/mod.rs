//! Data access
//!
//! Stats provider client, season-keyed reference tables, name/stat
//! resolution and dataset assembly.

pub mod dataset;
pub mod provider;
pub mod reference;
pub mod resolve;
pub mod teams;

pub use dataset::Dataset;
pub use provider::{NbaStatsClient, PlayerInfo, StatsProvider};
pub use reference::ReferenceTables;
