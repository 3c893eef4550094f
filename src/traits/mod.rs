//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET requests
//! - [`DiscussionSource`] - Where a discussion comes from (API, file)
//! - [`ViewedStorage`] - Persistent "discussion viewed" bookkeeping

pub mod http;
pub mod source;
pub mod viewed;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use source::DiscussionSource;
pub use viewed::ViewedStorage;
