//! Seams to the systems the engine drives but does not own.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use touch_rect_core::{project_quad_onto_planes, Frame, FrameRef, OrientedRect3D, Quad};

use crate::{Message, OutlineStyle};

/// Live camera view: where frames come from and how detector coordinates
/// land on screen.
pub trait SceneView {
    /// Latest captured frame, if tracking has produced one.
    fn current_frame(&self) -> Option<FrameRef>;

    /// Screen position of a normalized detector point.
    fn screen_from_normalized(&self, p: Point2<f32>) -> Point2<f32>;
}

/// Rectangle detection primitive.
///
/// Returns every candidate it finds, in its own preference order. Failure
/// is reported as an empty list.
pub trait RectangleDetector {
    fn detect(&self, frame: &Frame) -> Vec<Quad>;
}

impl<F> RectangleDetector for F
where
    F: Fn(&Frame) -> Vec<Quad>,
{
    fn detect(&self, frame: &Frame) -> Vec<Quad> {
        self(frame)
    }
}

/// Lifts a normalized quad into the 3D scene.
pub trait PlaneProjector {
    /// `None` when no surface plane supports the quad.
    fn project(&self, quad: &Quad, frame: &Frame) -> Option<OrientedRect3D>;
}

/// Projects onto the plane anchors carried by the frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchoredPlaneProjector;

impl PlaneProjector for AnchoredPlaneProjector {
    fn project(&self, quad: &Quad, frame: &Frame) -> Option<OrientedRect3D> {
        project_quad_onto_planes(quad, frame)
    }
}

/// Handle to a drawn selection outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutlineHandle(pub u64);

/// Handle to a placed 3D object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub u64);

/// Side-effect hooks into the rendering layer.
pub trait Presenter {
    fn set_message(&mut self, message: Option<Message>);
    fn draw_outline(&mut self, points: &[Point2<f32>; 4], style: &OutlineStyle) -> OutlineHandle;
    fn remove_outline(&mut self, handle: OutlineHandle);
    fn place_object(&mut self, rect: &OrientedRect3D) -> ObjectHandle;
    fn remove_object(&mut self, handle: ObjectHandle);
}
