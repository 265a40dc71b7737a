//! JSON configuration and scenario files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use touch_rect_core::{Camera, Frame, PlaneAnchor, Quad, Viewport};
use touch_rect_select::SelectionParams;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Screen size in points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

impl ViewportConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

/// Everything needed to build an engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub selection: SelectionParams,
}

/// A frame as stored in a scenario file. Pixel data is not stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub id: u64,
    #[serde(default)]
    pub timestamp: f64,
    pub camera: Camera,
    #[serde(default)]
    pub planes: Vec<PlaneAnchor>,
}

impl FrameSpec {
    pub fn to_frame(&self) -> Frame {
        Frame::new(self.id, self.timestamp, self.camera).with_planes(self.planes.clone())
    }
}

impl From<&Frame> for FrameSpec {
    fn from(frame: &Frame) -> Self {
        Self {
            id: frame.id,
            timestamp: frame.timestamp,
            camera: frame.camera,
            planes: frame.planes.clone(),
        }
    }
}

/// A scripted input event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    TouchDown { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchUp,
    /// Make frame `frame` current and run the per-frame tick.
    Frame { frame: u64 },
    /// Complete the pending detection with these candidates
    /// (normalized coordinates, detector order).
    Detect { candidates: Vec<Quad> },
    Clear,
    Restart,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::TouchDown { .. } => "touch_down",
            Action::TouchMove { .. } => "touch_move",
            Action::TouchUp => "touch_up",
            Action::Frame { .. } => "frame",
            Action::Detect { .. } => "detect",
            Action::Clear => "clear",
            Action::Restart => "restart",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Seconds since the start of the scenario.
    pub at: f64,
    #[serde(flatten)]
    pub action: Action,
}

/// A deterministic input script for [`replay`](crate::replay).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub frames: Vec<FrameSpec>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn frame(&self, id: u64) -> Option<&FrameSpec> {
        self.frames.iter().find(|f| f.id == id)
    }
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
