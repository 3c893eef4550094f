//! Discussion sources.
//!
//! - [`NwsSource`] - latest AFD for an office from the NWS API
//! - [`FileSource`] - a saved product or raw bulletin text on disk

mod file;
mod nws;

pub use file::FileSource;
pub use nws::{NwsSource, ProductList, ProductSummary};
