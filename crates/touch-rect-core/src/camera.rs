use nalgebra::{Isometry3, Point2, Point3, UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Pinhole intrinsics expressed in normalized image units.
///
/// `cx`, `cy` and the image-space coordinates they refer to use a top-left
/// origin with y down, the usual camera convention. Normalized detector
/// points (bottom-left origin, y up) are flipped before use.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
}

impl Default for Intrinsics {
    /// Roughly a phone wide camera (~64° horizontal field of view).
    fn default() -> Self {
        Self {
            fx: 0.8,
            fy: 0.8,
            cx: 0.5,
            cy: 0.5,
        }
    }
}

/// Half-line in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    /// Unit direction.
    pub dir: Vector3<f32>,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.dir * t
    }
}

/// Camera state for one frame: intrinsics plus pose.
///
/// Camera frame convention: +z looks forward, +x right, +y down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub intrinsics: Intrinsics,
    pub world_from_camera: Isometry3<f32>,
}

impl Camera {
    pub fn new(intrinsics: Intrinsics, world_from_camera: Isometry3<f32>) -> Self {
        Self {
            intrinsics,
            world_from_camera,
        }
    }

    /// World-space ray through a normalized detector point.
    pub fn ray_through(&self, normalized: Point2<f32>) -> Ray {
        let k = &self.intrinsics;
        let x_img = normalized.x;
        let y_img = 1.0 - normalized.y;
        let dir_cam = Vector3::new((x_img - k.cx) / k.fx, (y_img - k.cy) / k.fy, 1.0);
        let dir = (self.world_from_camera.rotation * dir_cam).normalize();
        let origin = Point3::from(self.world_from_camera.translation.vector);
        Ray { origin, dir }
    }
}

/// A finite surface plane discovered by scene tracking.
///
/// The plane's local +y axis is its normal; `extent` is the full size along
/// the local x and z axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneAnchor {
    pub id: u64,
    pub center: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub extent: Vector2<f32>,
}

impl PlaneAnchor {
    /// Horizontal plane (normal +y) centered at `center`.
    pub fn horizontal(id: u64, center: Point3<f32>, extent: Vector2<f32>) -> Self {
        Self {
            id,
            center,
            orientation: UnitQuaternion::identity(),
            extent,
        }
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.orientation * Vector3::y()
    }

    /// Ray/plane hit in front of the ray origin, ignoring the extent.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Point3<f32>)> {
        const EPS: f32 = 1e-6;
        let n = self.normal();
        let denom = n.dot(&ray.dir);
        if denom.abs() < EPS {
            return None;
        }
        let t = n.dot(&(self.center - ray.origin)) / denom;
        if t <= EPS {
            return None;
        }
        Some((t, ray.at(t)))
    }

    /// Whether a point on the plane lies within its extent.
    pub fn contains(&self, p: &Point3<f32>) -> bool {
        let local = self.orientation.inverse() * (p - self.center);
        local.x.abs() <= 0.5 * self.extent.x && local.z.abs() <= 0.5 * self.extent.y
    }
}
