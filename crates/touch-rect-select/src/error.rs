use crate::{Message, PlacementId};

/// Non-fatal failures of one interaction cycle.
///
/// These never propagate out of the engine: each one is surfaced through
/// the message slot and ends the current cycle.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionFailure {
    #[error("no rectangle found at the touch location")]
    NoRectangleFound,
    #[error("no surface plane under the selected rectangle")]
    NoPlaneForRectangle,
}

impl SelectionFailure {
    pub fn message(self) -> Message {
        match self {
            SelectionFailure::NoRectangleFound => Message::NoRectangleFound,
            SelectionFailure::NoPlaneForRectangle => Message::NoPlaneForRectangle,
        }
    }
}

/// Errors returned by [`PlacementRegistry`](crate::PlacementRegistry).
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("placement {0} is already registered")]
    DuplicateId(PlacementId),
}
