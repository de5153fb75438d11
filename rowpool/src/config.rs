//! Recycler configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-controller configuration.
///
/// Fixed for the lifetime of a [`VirtualizationController`](crate::VirtualizationController);
/// hosts that need different settings build a new controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecyclerConfig {
    /// Height of every row, in surface units.
    pub row_height: f32,

    /// Extra slots kept beyond the rows strictly needed to cover the viewport.
    pub overscan: usize,

    /// Toggle the alternating-row class and synthesize filler rows.
    pub alternating_rows: bool,

    /// How many consecutive passes a slot may be held back by an active drag
    /// before it is resynced anyway (None = wait for the drag to finish).
    pub max_drag_deferrals: Option<u32>,
}

impl Default for RecyclerConfig {
    fn default() -> Self {
        Self {
            row_height: 1.0,
            overscan: 2,
            alternating_rows: true,
            max_drag_deferrals: Some(16),
        }
    }
}

impl RecyclerConfig {
    /// Create a config with the given row height.
    pub fn new(row_height: f32) -> Self {
        Self {
            row_height,
            ..Default::default()
        }
    }

    /// Set the overscan margin.
    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Enable or disable alternating row backgrounds.
    pub fn alternating_rows(mut self, enabled: bool) -> Self {
        self.alternating_rows = enabled;
        self
    }

    /// Bound the number of passes a dragged slot may be deferred.
    pub fn max_drag_deferrals(mut self, max: Option<u32>) -> Self {
        self.max_drag_deferrals = max;
        self
    }

    /// Check that the config describes a usable window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(ConfigError::InvalidRowHeight(self.row_height));
        }
        if self.max_drag_deferrals == Some(0) {
            return Err(ConfigError::ZeroDragDeferrals);
        }
        Ok(())
    }
}
