//! Utilities Module
//!
//! Logging and configuration shared across the crate.

pub mod logging;
pub mod signing_config;

pub use signing_config::SigningSettings;
