//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileViewedStorage`] - Viewed bookkeeping in `~/.afdview/viewed.json`
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_viewed;
pub mod mock;
pub mod reqwest_http;

pub use file_viewed::{FileViewedStorage, ViewedState};
pub use mock::{InMemoryViewedStorage, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
