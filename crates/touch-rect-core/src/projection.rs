//! Lifting a normalized image quad onto a tracked surface plane.

use crate::{Frame, PlaneAnchor, Quad};
use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A rectangle lying on a surface plane in world space.
///
/// Local axes: x runs along the rectangle's width (top-left → top-right),
/// y is the supporting plane's normal, z runs along its height
/// (top → bottom).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect3D {
    pub center: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    /// `(width, height)` in world units.
    pub size: Vector2<f32>,
    /// World-space corners in `[tl, tr, br, bl]` order.
    pub corners: [Point3<f32>; 4],
    /// Anchor id of the supporting plane.
    pub plane_id: u64,
}

/// Project a normalized quad onto the nearest plane anchor of `frame` that
/// supports it.
///
/// A plane supports the quad when all four corner rays hit it in front of
/// the camera and the centroid of the hits lies within the plane's extent.
/// Returns `None` when no plane qualifies or the quad is degenerate.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(quad, frame), fields(frame = frame.id, planes = frame.planes.len()))
)]
pub fn project_quad_onto_planes(quad: &Quad, frame: &Frame) -> Option<OrientedRect3D> {
    let rays = quad.corners().map(|p| frame.camera.ray_through(p));

    let mut best: Option<(f32, &PlaneAnchor, [Point3<f32>; 4])> = None;
    for plane in &frame.planes {
        let mut hits = [Point3::origin(); 4];
        let mut depth = 0.0_f32;
        let mut supported = true;
        for (slot, ray) in hits.iter_mut().zip(rays.iter()) {
            match plane.intersect(ray) {
                Some((t, p)) => {
                    *slot = p;
                    depth += t;
                }
                None => {
                    supported = false;
                    break;
                }
            }
        }
        if !supported || !plane.contains(&centroid(&hits)) {
            continue;
        }
        if best.as_ref().is_none_or(|(d, _, _)| depth < *d) {
            best = Some((depth, plane, hits));
        }
    }

    let (_, plane, hits) = best?;
    rect_on_plane(plane, hits)
}

fn centroid(pts: &[Point3<f32>; 4]) -> Point3<f32> {
    let sum = pts.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / 4.0)
}

fn rect_on_plane(plane: &PlaneAnchor, hits: [Point3<f32>; 4]) -> Option<OrientedRect3D> {
    const EPS: f32 = 1e-6;
    let [tl, tr, br, bl] = hits;
    let n = plane.normal();

    let along = (tr - tl) + (br - bl);
    let x_axis = along - n * n.dot(&along);
    if x_axis.norm() < EPS {
        return None;
    }
    let x_axis = x_axis.normalize();
    let z_axis = x_axis.cross(&n);

    let rot = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x_axis, n, z_axis]));
    let width = 0.5 * ((tr - tl).norm() + (br - bl).norm());
    let height = 0.5 * ((bl - tl).norm() + (br - tr).norm());

    Some(OrientedRect3D {
        center: centroid(&hits),
        orientation: UnitQuaternion::from_rotation_matrix(&rot),
        size: Vector2::new(width, height),
        corners: hits,
        plane_id: plane.id,
    })
}
