use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Four ordered corners of a detected rectangle.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left, as seen
/// in the coordinate space the quad lives in. A quad is a plain value: it
/// has no identity beyond the detection pass that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
}

impl Quad {
    pub fn new(
        top_left: Point2<f32>,
        top_right: Point2<f32>,
        bottom_right: Point2<f32>,
        bottom_left: Point2<f32>,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Build a quad from corners in `[tl, tr, br, bl]` order.
    pub fn from_corners(c: [Point2<f32>; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Corners in `[tl, tr, br, bl]` order.
    #[inline]
    pub fn corners(&self) -> [Point2<f32>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Apply `f` to every corner, keeping the corner order.
    pub fn map(&self, f: impl FnMut(Point2<f32>) -> Point2<f32>) -> Self {
        Self::from_corners(self.corners().map(f))
    }

    /// Even-odd containment test. Points on an edge count as inside.
    pub fn contains(&self, p: Point2<f32>) -> bool {
        let pts = self.corners();
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[j];
            if on_segment(a, b, p) {
                return true;
            }
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Absolute polygon area (shoelace formula).
    pub fn area(&self) -> f32 {
        let pts = self.corners();
        let mut acc = 0.0_f32;
        for i in 0..4 {
            let a = pts[i];
            let b = pts[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        0.5 * acc.abs()
    }

    /// Mean of the four corners.
    pub fn centroid(&self) -> Point2<f32> {
        let pts = self.corners();
        let sx: f32 = pts.iter().map(|p| p.x).sum();
        let sy: f32 = pts.iter().map(|p| p.y).sum();
        Point2::new(sx / 4.0, sy / 4.0)
    }

    /// Smallest axis-aligned box holding all corners.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(&self.corners())
    }
}

fn on_segment(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> bool {
    const EPS: f32 = 1e-5;
    let ab = b - a;
    let ap = p - a;
    let cross = ab.x * ap.y - ab.y * ap.x;
    let scale = ab.norm().max(1.0);
    if cross.abs() > EPS * scale {
        return false;
    }
    let dot = ab.dot(&ap);
    dot >= -EPS && dot <= ab.norm_squared() + EPS
}

/// Axis-aligned bounding box with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl Aabb {
    pub fn from_points(points: &[Point2<f32>]) -> Self {
        let mut min = Point2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, p: Point2<f32>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The box as a quad, assuming y grows downwards (screen space).
    pub fn to_quad(&self) -> Quad {
        Quad::new(
            Point2::new(self.min.x, self.min.y),
            Point2::new(self.max.x, self.min.y),
            Point2::new(self.max.x, self.max.y),
            Point2::new(self.min.x, self.max.y),
        )
    }
}
