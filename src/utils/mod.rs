//! Utilities Module
//!
//! Common utilities used across the crate.

pub mod crypto;
pub mod logging;
pub mod network_config;

pub use crypto::*;
