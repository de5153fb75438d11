use thiserror::Error;

/// Errors produced when validating a [`RecyclerConfig`](crate::RecyclerConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Row height must be a finite, positive number.
    #[error("row height must be finite and positive, got {0}")]
    InvalidRowHeight(f32),

    /// A drag deferral bound of zero would never defer.
    #[error("max_drag_deferrals must be at least 1 (use None to defer indefinitely)")]
    ZeroDragDeferrals,
}
