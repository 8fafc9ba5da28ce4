//! Pagination types
//!
//! Defines the per-query pagination state and the reasons it can stop.

use serde::Serialize;
use serde_json::Value;

/// Page count assumed until the first successful response reports one
pub const PAGE_MAX_SENTINEL: u32 = 10_000;

/// JSON path of the page count in a flight status response
const TOTAL_PAGES_PATH: &str = "$.page.totalPages";

/// Why pagination of a parameter set finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The page number reached the server-reported page count
    LastPage,
    /// The page number reached the configured page cap
    PageCap,
    /// A successful response carried no page count
    NoPageInfo,
}

/// Tracks pagination state for one parameter set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Next page to request
    page_number: u32,
    /// Page count, the sentinel until the server reports one
    page_max: u32,
    /// Page count from the latest response
    reported_total: Option<u32>,
    /// Optional upper bound on page numbers
    page_cap: Option<u32>,
    /// Set when a response had no page count
    unpaginated: bool,
}

impl PaginationState {
    /// Start at `resume_point` with the sentinel page count
    pub fn new(resume_point: u32, page_cap: Option<u32>) -> Self {
        Self {
            page_number: resume_point,
            page_max: PAGE_MAX_SENTINEL,
            reported_total: None,
            page_cap,
            unpaginated: false,
        }
    }

    /// Next page to request
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Current page count
    pub fn page_max(&self) -> u32 {
        self.page_max
    }

    /// Server-reported page count, if one has been seen
    pub fn total_pages(&self) -> Option<u32> {
        self.reported_total
    }

    /// Why pagination must stop now, or `None` to keep fetching
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.unpaginated {
            Some(StopReason::NoPageInfo)
        } else if self.page_cap.is_some_and(|cap| self.page_number >= cap) {
            Some(StopReason::PageCap)
        } else if self.page_number >= self.page_max {
            Some(StopReason::LastPage)
        } else {
            None
        }
    }

    /// Record a stored page: take the response's page count and advance.
    pub fn record_page(&mut self, total_pages: Option<u32>) {
        match total_pages {
            Some(total) => {
                self.page_max = total;
                self.reported_total = Some(total);
            }
            None => self.unpaginated = true,
        }
        self.page_number += 1;
    }
}

/// Read `page.totalPages` from a response body
pub fn extract_total_pages(body: &Value) -> Option<u32> {
    let path = TOTAL_PAGES_PATH.strip_prefix("$.").unwrap_or(TOTAL_PAGES_PATH);

    let mut current = body;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    match current {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
