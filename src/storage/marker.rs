//! Progress marker persisted next to the artifacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known progress of one encoded query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressMarker {
    /// First page not yet written when the marker was saved
    pub next_page: u32,
    /// Page count reported by the server on the last successful response
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// When the marker was saved
    pub updated_at: DateTime<Utc>,
}

impl ProgressMarker {
    /// Create a marker stamped with the current time
    pub fn new(next_page: u32, total_pages: Option<u32>) -> Self {
        Self {
            next_page,
            total_pages,
            updated_at: Utc::now(),
        }
    }

    /// Whether the server-reported page count says `page` is past the end
    pub fn is_complete_at(&self, page: u32) -> bool {
        self.total_pages.is_some_and(|total| page >= total)
    }
}
