use nalgebra::Point2;
use touch_rect_core::{FrameRef, Viewport};
use touch_rect_select::SceneView;

/// Scene view fed by the caller: a display transform plus the latest frame.
#[derive(Clone, Debug)]
pub struct LiveScene {
    viewport: Viewport,
    frame: Option<FrameRef>,
}

impl LiveScene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            frame: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replace the display transform, e.g. after a rotation.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn frame(&self) -> Option<&FrameRef> {
        self.frame.as_ref()
    }

    pub fn set_frame(&mut self, frame: FrameRef) {
        self.frame = Some(frame);
    }
}

impl SceneView for LiveScene {
    fn current_frame(&self) -> Option<FrameRef> {
        self.frame.clone()
    }

    fn screen_from_normalized(&self, p: Point2<f32>) -> Point2<f32> {
        self.viewport.to_screen(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Isometry3;
    use touch_rect_core::{Camera, Frame, Intrinsics};

    #[test]
    fn frame_slot_holds_latest() {
        let mut scene = LiveScene::new(Viewport::new(200.0, 100.0));
        assert!(scene.current_frame().is_none());

        let cam = Camera::new(Intrinsics::default(), Isometry3::identity());
        scene.set_frame(Frame::new(1, 0.0, cam).into_ref());
        scene.set_frame(Frame::new(2, 0.1, cam).into_ref());
        assert_eq!(scene.current_frame().map(|f| f.id), Some(2));
    }

    #[test]
    fn maps_through_viewport() {
        let scene = LiveScene::new(Viewport::new(200.0, 100.0));
        let p = scene.screen_from_normalized(Point2::new(0.25, 0.75));
        assert_relative_eq!(p, Point2::new(50.0, 25.0), epsilon = 1e-4);
    }
}
