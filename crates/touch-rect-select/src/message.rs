use serde::{Deserialize, Serialize};

/// User-facing status shown in the single message slot.
///
/// Setting a message replaces the previous one; `None` hides the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// No surface is known yet: move the device around.
    FindSurface,
    /// Idle prompt: touch and hold over a rectangle.
    HoldToSelect,
    /// Finger is down: keep holding, release to confirm.
    ReleaseToPlace,
    /// The detection pass found no rectangle under the finger.
    NoRectangleFound,
    /// A rectangle was selected but no surface plane supports it.
    NoPlaneForRectangle,
}

impl Message {
    /// Stable identifier, suitable as a localization key.
    pub fn key(self) -> &'static str {
        match self {
            Message::FindSurface => "help_find_surface",
            Message::HoldToSelect => "help_tap_hold_rect",
            Message::ReleaseToPlace => "help_tap_release_rect",
            Message::NoRectangleFound => "err_no_rect",
            Message::NoPlaneForRectangle => "err_no_plane_for_rect",
        }
    }

    /// Default English text.
    pub fn text(self) -> &'static str {
        match self {
            Message::FindSurface => "Move your device around to find a surface",
            Message::HoldToSelect => "Tap and hold on a rectangle to select it",
            Message::ReleaseToPlace => "Hold, then release to confirm the rectangle",
            Message::NoRectangleFound => "No rectangle found here, try again",
            Message::NoPlaneForRectangle => "No surface found under this rectangle",
        }
    }

    /// Whether this message reports a failed interaction.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Message::NoRectangleFound | Message::NoPlaneForRectangle
        )
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let all = [
            Message::FindSurface,
            Message::HoldToSelect,
            Message::ReleaseToPlace,
            Message::NoRectangleFound,
            Message::NoPlaneForRectangle,
        ];
        let mut keys: Vec<_> = all.iter().map(|m| m.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), all.len());
        assert_eq!(all.iter().filter(|m| m.is_error()).count(), 2);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Message::NoPlaneForRectangle).expect("serialize");
        assert_eq!(json, "\"no_plane_for_rectangle\"");
    }
}
