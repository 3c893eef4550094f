//! Discussion source trait abstraction.

use async_trait::async_trait;

use crate::discussion::Discussion;
use crate::error::SourceError;

/// Something that can produce the current discussion.
///
/// The NWS API and local files implement this; the app only sees the trait.
#[async_trait]
pub trait DiscussionSource: Send + Sync {
    /// Load the latest discussion.
    ///
    /// Returns [`SourceError::NotAvailable`] when the source has no product.
    async fn load(&self) -> Result<Discussion, SourceError>;

    /// Short description for titles and logs, e.g. `KPQR` or a file name.
    fn describe(&self) -> String;
}
