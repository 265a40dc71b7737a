use crate::{homography_from_4pt, Aabb, Homography, Quad};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Maps normalized detector coordinates onto the screen.
///
/// Normalized points have their origin at the bottom-left of the camera
/// image with y up; screen points have their origin at the top-left of the
/// view with y down. The mapping is a homography so rotated, cropped, or
/// aspect-filled camera previews are handled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    screen_from_normalized: Homography,
}

impl Viewport {
    /// Camera image shown unrotated and stretched over a `width × height` view.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            screen_from_normalized: Homography::scale_translate(
                width as f64,
                -(height as f64),
                0.0,
                height as f64,
            ),
        }
    }

    /// Build a viewport from where the normalized unit square lands on
    /// screen, corners given as `[tl, tr, br, bl]` of the camera image.
    ///
    /// Returns `None` when the corners are degenerate.
    pub fn from_screen_corners(width: f32, height: f32, corners: [Point2<f32>; 4]) -> Option<Self> {
        let unit = [
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let screen_from_normalized = homography_from_4pt(&unit, &corners)?;
        Some(Self {
            width,
            height,
            screen_from_normalized,
        })
    }

    /// Screen position of a normalized detector point.
    #[inline]
    pub fn to_screen(&self, p: Point2<f32>) -> Point2<f32> {
        self.screen_from_normalized.apply(p)
    }

    /// Normalized detector position of a screen point.
    pub fn to_normalized(&self, p: Point2<f32>) -> Option<Point2<f32>> {
        Some(self.screen_from_normalized.inverse()?.apply(p))
    }

    /// Map every corner of a normalized quad to the screen.
    pub fn quad_to_screen(&self, quad: &Quad) -> Quad {
        quad.map(|p| self.to_screen(p))
    }

    /// Screen-space box of a normalized box, the way a view converts a
    /// camera-space rect: map all four corners, then re-box.
    pub fn aabb_to_screen(&self, bb: &Aabb) -> Aabb {
        let corners = bb.to_quad().corners().map(|p| self.to_screen(p));
        Aabb::from_points(&corners)
    }

    /// Whether a screen point lies within the view bounds.
    pub fn contains(&self, p: Point2<f32>) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}
