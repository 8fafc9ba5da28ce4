//! Pagination module
//!
//! Page-number pagination with a server-reported page count and an
//! optional page cap.
//!
//! # Overview
//!
//! `PaginationState` tracks where one parameter set's collection stands.
//! It only ever moves forward: the page number increases by one per stored
//! page, and the page count is replaced by whatever the latest response
//! reports.

mod types;

pub use types::{extract_total_pages, PaginationState, StopReason, PAGE_MAX_SENTINEL};
