#![allow(dead_code)]

use nalgebra::{Isometry3, Point2, Point3, Translation3, UnitQuaternion, Vector2, Vector3};
use touch_rect::core::{Camera, Frame, Intrinsics, PlaneAnchor, Quad};
use touch_rect::io::{Action, EngineConfig, FrameSpec, Scenario, Step, ViewportConfig};

pub const VIEW: f32 = 100.0;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Camera one metre above the world origin looking straight down.
pub fn top_down_camera() -> Camera {
    let rot = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::FRAC_PI_2);
    Camera::new(
        Intrinsics {
            fx: 1.0,
            fy: 1.0,
            cx: 0.5,
            cy: 0.5,
        },
        Isometry3::from_parts(Translation3::new(0.0, 1.0, 0.0), rot),
    )
}

pub fn floor() -> PlaneAnchor {
    PlaneAnchor::horizontal(7, Point3::origin(), Vector2::new(4.0, 4.0))
}

pub fn frame_with_floor(id: u64) -> Frame {
    Frame::new(id, id as f64 / 30.0, top_down_camera()).with_planes(vec![floor()])
}

pub fn frame_without_planes(id: u64) -> Frame {
    Frame::new(id, id as f64 / 30.0, top_down_camera())
}

/// Normalized quad covering the screen rect `[x0, x1] × [y0, y1]` of a
/// `VIEW`×`VIEW` viewport.
pub fn screen_rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Quad {
    let n = |x: f32, y: f32| Point2::new(x / VIEW, 1.0 - y / VIEW);
    Quad::new(n(x0, y0), n(x1, y0), n(x1, y1), n(x0, y1))
}

pub fn step(at: f64, action: Action) -> Step {
    Step { at, action }
}

pub fn scenario(frames: Vec<Frame>, steps: Vec<Step>) -> Scenario {
    Scenario {
        config: EngineConfig {
            viewport: ViewportConfig {
                width: VIEW,
                height: VIEW,
            },
            ..EngineConfig::default()
        },
        frames: frames.iter().map(FrameSpec::from).collect(),
        steps,
    }
}
