//! Employee-to-role match scoring.
//!
//! The [`matching`] module holds the scoring engine, the batch orchestrator and the
//! collaborator traits the storage layer implements. Configuration, telemetry and the
//! top-level error type live beside it so the API service can share them.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
