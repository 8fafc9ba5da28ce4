//! Common types used throughout the collector
//!
//! This module contains the policy enums shared by the configuration
//! and the engine.

use serde::{Deserialize, Serialize};

// ============================================================================
// Abort Policy
// ============================================================================

/// What to do when every credential failed on the same page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortPolicy {
    /// Stop the current parameter set and continue with the next one
    #[default]
    SkipParameterSet,
    /// Stop the whole run
    AbortRun,
}

// ============================================================================
// Resume Strategy
// ============================================================================

/// How the first missing page of a query is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStrategy {
    /// Probe artifacts from page 0 upwards
    #[default]
    Probe,
    /// Start probing from the persisted progress marker
    Marker,
}
