//! Local file source.
//!
//! `.json` files hold a saved NWS product; anything else is raw bulletin
//! text whose office and issuance time come from the command line.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::discussion::Discussion;
use crate::error::SourceError;
use crate::traits::DiscussionSource;

/// Office used for raw text files when none is given.
const UNKNOWN_OFFICE: &str = "XXXX";

/// Loads a discussion from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    office: Option<String>,
    issuance_time: Option<String>,
}

impl FileSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            office: None,
            issuance_time: None,
        }
    }

    /// Office for raw text files.
    pub fn with_office(mut self, office: impl Into<String>) -> Self {
        self.office = Some(office.into().trim().to_uppercase());
        self
    }

    /// Issuance time for raw text files.
    pub fn with_issuance_time(mut self, issuance_time: impl Into<String>) -> Self {
        self.issuance_time = Some(issuance_time.into());
        self
    }

    /// Path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    /// Issuance time for raw text: the explicit value, else the file's
    /// modification time.
    async fn raw_issuance_time(&self) -> String {
        if let Some(time) = &self.issuance_time {
            return time.clone();
        }
        match tokio::fs::metadata(&self.path).await.and_then(|meta| meta.modified()) {
            Ok(modified) => chrono::DateTime::<chrono::Utc>::from(modified).to_rfc3339(),
            Err(_) => String::new(),
        }
    }
}

#[async_trait]
impl DiscussionSource for FileSource {
    async fn load(&self) -> Result<Discussion, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::File {
                path: self.path.clone(),
                source,
            })?;

        let mut discussion = if self.is_json() {
            serde_json::from_str::<Discussion>(&contents)?
        } else {
            Discussion::new(
                contents,
                self.office.as_deref().unwrap_or(UNKNOWN_OFFICE),
                self.raw_issuance_time().await,
            )
        };

        if discussion.product_text.trim().is_empty() {
            return Err(SourceError::NotAvailable {
                office: discussion.issuing_office,
            });
        }

        // An explicit office wins over the saved product's.
        if let Some(office) = &self.office {
            discussion.issuing_office = office.clone();
        }

        tracing::info!(path = %self.path.display(), office = %discussion.issuing_office, "discussion read from file");
        Ok(discussion)
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
