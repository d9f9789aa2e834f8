use serde::{Deserialize, Serialize};

/// Configuration for a single run, fixed before the scan starts.
///
/// Deserializes from JSON such as
/// `{"filtered_amount": 100, "track_paths": true}`; missing fields take their
/// defaults (no filtering, flat output).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Only amounts strictly greater than this are reported. `None` reports
    /// every numeric amount.
    pub filtered_amount: Option<i32>,
    /// Report `id` attributes as `/abs/path/@id = "..."` instead of
    /// `Order ID: ...`.
    pub track_paths: bool,
}

impl ReportConfig {
    /// No filtering, flat output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filtered_amount: None,
            track_paths: false,
        }
    }

    /// Set the amount threshold.
    #[must_use]
    pub const fn with_filtered_amount(mut self, threshold: i32) -> Self {
        self.filtered_amount = Some(threshold);
        self
    }

    /// Enable or disable path-qualified `id` output.
    #[must_use]
    pub const fn with_track_paths(mut self, track_paths: bool) -> Self {
        self.track_paths = track_paths;
        self
    }

    /// Whether `amount` passes the configured threshold.
    #[must_use]
    pub const fn passes(&self, amount: i32) -> bool {
        match self.filtered_amount {
            Some(threshold) => amount > threshold,
            None => true,
        }
    }
}
