//! Kairos HTTP Server Library
//!
//! REST API components, configuration and the `kairos` command line,
//! exposed for the binaries and for testing.

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
