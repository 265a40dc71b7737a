use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a candidate's outline is tested against the touch point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentMode {
    /// The on-screen quadrilateral itself.
    #[default]
    Quad,
    /// The axis-aligned box around the quadrilateral's corners.
    BoundingBox,
}

/// Which candidate wins when several contain the touch point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First candidate in detector order.
    #[default]
    FirstInOrder,
    /// Smallest on-screen area; detector order among equal areas.
    SmallestArea,
}

/// Stroke used for the selection outline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlineStyle {
    /// RGBA color.
    pub color: [u8; 4],
    /// Stroke width in screen points.
    pub line_width: f32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0, 255],
            line_width: 2.0,
        }
    }
}

/// Configuration for [`SelectionEngine`](crate::SelectionEngine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    /// Minimum time between frame-driven re-detections of a held selection,
    /// in seconds.
    #[serde(default = "default_debounce_interval_s")]
    pub debounce_interval_s: f64,
    #[serde(default)]
    pub containment: ContainmentMode,
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Abandon an in-flight detection older than this many seconds.
    ///
    /// `None` waits forever: a stuck detector then blocks further
    /// touch-driven updates until it answers.
    #[serde(default)]
    pub request_timeout_s: Option<f64>,
    #[serde(default)]
    pub outline: OutlineStyle,
}

fn default_debounce_interval_s() -> f64 {
    1.0
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            debounce_interval_s: default_debounce_interval_s(),
            containment: ContainmentMode::default(),
            tie_break: TieBreak::default(),
            request_timeout_s: None,
            outline: OutlineStyle::default(),
        }
    }
}

impl SelectionParams {
    /// An infinite interval disables frame-driven re-detection.
    pub fn debounce_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.debounce_interval_s.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Values too large for a [`Duration`] saturate to [`Duration::MAX`].
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_s
            .filter(|s| !s.is_nan() && *s >= 0.0)
            .map(|s| Duration::try_from_secs_f64(s).unwrap_or(Duration::MAX))
    }
}
