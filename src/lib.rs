//! afdview - a terminal viewer for NWS Area Forecast Discussions
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod discussion;
pub mod error;
pub mod linkify;
pub mod logging;
pub mod source;
pub mod store;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod viewed;
