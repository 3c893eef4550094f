//! Forecast discussion model and text processing.
//!
//! A discussion bulletin goes through three steps before it reaches the UI:
//!
//! 1. [`undo_fixed_width_text`] joins the hard line wraps of the fixed-width
//!    product text back into paragraphs.
//! 2. [`segments`] / [`parse_discussion`] split the text into prose blocks
//!    and `.HEADER...` sections.
//! 3. [`HeaderLabel::classify`] turns a section header into a display title,
//!    an optional aside and a topic color.

mod header;
mod normalize;
mod segment;

pub use header::{capitalize_words, format_header_title, split_aside, HeaderColor, HeaderLabel};
pub use normalize::undo_fixed_width_text;
pub use segment::{parse_discussion, segments, DiscussionPart, Segment, Segments};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A loaded forecast discussion product.
///
/// Field names follow the NWS product JSON so the API response can be
/// deserialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    /// Raw bulletin text, still fixed-width wrapped
    pub product_text: String,
    /// Issuing office identifier, e.g. `KPQR`
    pub issuing_office: String,
    /// Issuance timestamp as issued by the API (RFC 3339)
    pub issuance_time: String,
}

impl Discussion {
    /// Create a new discussion.
    pub fn new(
        product_text: impl Into<String>,
        issuing_office: impl Into<String>,
        issuance_time: impl Into<String>,
    ) -> Self {
        Self {
            product_text: product_text.into(),
            issuing_office: issuing_office.into(),
            issuance_time: issuance_time.into(),
        }
    }

    /// Office code as it appears inside header text.
    ///
    /// Issuing offices carry a leading ICAO region letter (`KPQR`) that the
    /// bulletin itself omits (`PQR`).
    pub fn office_code(&self) -> &str {
        let mut chars = self.issuing_office.chars();
        chars.next();
        chars.as_str()
    }

    /// Parse the issuance timestamp.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.issuance_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Normalized bulletin text, ready for segmentation.
    pub fn normalized_text(&self) -> String {
        undo_fixed_width_text(self.product_text.trim())
    }

    /// Identity of this discussion: one issuance from one office.
    pub fn key(&self) -> (&str, &str) {
        (&self.issuing_office, &self.issuance_time)
    }
}

/// Load state of the current discussion as seen by the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiscussionState {
    /// Nothing has been requested yet
    #[default]
    Missing,
    /// Loading failed
    Failed,
    /// The office has no discussion right now
    NotAvailable,
    /// A load is in flight
    Pending,
    /// A discussion is available
    Loaded(Discussion),
}

impl DiscussionState {
    /// The loaded discussion, if any.
    pub fn discussion(&self) -> Option<&Discussion> {
        match self {
            DiscussionState::Loaded(discussion) => Some(discussion),
            _ => None,
        }
    }

    /// Check whether a load is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, DiscussionState::Pending)
    }
}
