//! AppMessage enum for async communication within the application.

use crate::discussion::Discussion;
use crate::error::SourceError;

/// Messages received from background tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// A load finished. `generation` identifies the request so results of
    /// superseded loads can be dropped.
    LoadFinished {
        generation: u64,
        result: Result<Discussion, SourceError>,
    },
    /// Opening a link in the browser failed
    LinkOpenFailed { url: String, error: String },
}
