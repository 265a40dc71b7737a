use std::time::Instant;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use touch_rect_core::Quad;

use crate::RequestId;

/// Coarse interaction phase, derived from [`SelectionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    /// No detection in flight and no held selection.
    Idle,
    /// A detection pass is in flight.
    Searching,
    /// A rectangle is selected and the finger is still down.
    Tracking,
}

/// Bookkeeping for the single in-flight detection pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct InFlight {
    pub(crate) id: RequestId,
    pub(crate) dispatched_at: Instant,
}

/// The engine's single mutable record of what is currently selected.
///
/// Invariants:
/// - at most one detection pass is in flight;
/// - `active` is only set from a pass whose candidate contained the touch
///   point that pass was launched with.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    pub(crate) active: Option<Quad>,
    pub(crate) last_updated_at: Option<Instant>,
    pub(crate) in_flight: Option<InFlight>,
    pub(crate) touch: Option<Point2<f32>>,
}

impl SelectionState {
    /// Best match for the current or last touch, in normalized coordinates.
    pub fn active_rectangle(&self) -> Option<&Quad> {
        self.active.as_ref()
    }

    /// When `active_rectangle` was last confirmed.
    pub fn last_updated_at(&self) -> Option<Instant> {
        self.last_updated_at
    }

    /// Whether a detection pass is in flight.
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id of the in-flight detection pass.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.in_flight.map(|f| f.id)
    }

    /// Current finger position in screen space, `None` when not touching.
    pub fn touch_location(&self) -> Option<Point2<f32>> {
        self.touch
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.is_searching() {
            SelectionPhase::Searching
        } else if self.active.is_some() && self.touch.is_some() {
            SelectionPhase::Tracking
        } else {
            SelectionPhase::Idle
        }
    }
}
