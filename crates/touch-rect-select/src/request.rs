use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use touch_rect_core::{FrameRef, Quad};

/// Identifies one detection pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A detection pass the caller must run on `frame`.
#[derive(Clone, Debug)]
pub struct DetectionRequest {
    pub id: RequestId,
    pub frame: FrameRef,
    /// Touch location (screen space) when the pass was dispatched.
    pub touch: Point2<f32>,
}

/// Detector output for one [`DetectionRequest`].
#[derive(Clone, Debug)]
pub struct DetectionResponse {
    pub id: RequestId,
    pub touch: Point2<f32>,
    /// Candidates in detector order, corners in normalized coordinates.
    pub candidates: Vec<Quad>,
}

impl DetectionResponse {
    pub fn new(request: &DetectionRequest, candidates: Vec<Quad>) -> Self {
        Self {
            id: request.id,
            touch: request.touch,
            candidates,
        }
    }
}
