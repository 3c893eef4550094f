//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryViewedStorage`] - Viewed bookkeeping without touching disk

pub mod http;
pub mod viewed;

pub use http::{MockHttpClient, MockResponse};
pub use viewed::InMemoryViewedStorage;
