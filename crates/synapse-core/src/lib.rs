//! Synapse Core: error type, configuration and data directory layout.

pub mod config;
pub mod error;

pub use config::{DataPaths, SynapseConfig, TrendsDefaults};
pub use error::{Error, Result};
