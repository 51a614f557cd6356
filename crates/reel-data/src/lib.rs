//! Data ingestion and derivation layer for Chatreel.
//!
//! Responsible for discovering, reading and validating chat export files,
//! grouping messages into daily activity series, ranking participants and
//! running the top-level analysis pipeline consumed by the scene layer.

pub mod aggregator;
pub mod analysis;
pub mod loader;

pub use reel_core as core;
