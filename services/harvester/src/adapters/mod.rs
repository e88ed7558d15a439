//! services/harvester/src/adapters/mod.rs
//!
//! Declares the adapter modules implementing the core's ports and the
//! export sinks.

pub mod export;
pub mod steam;
