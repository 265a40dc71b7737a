//! Drive a live session with a synthetic detector and a camera hovering
//! over a floor plane.
//!
//! Run with `cargo run -p touch-rect --example live_session`.

use std::time::Duration;

use nalgebra::{Isometry3, Point2, Point3, Translation3, UnitQuaternion, Vector2, Vector3};
use touch_rect::core::{Camera, Frame, Intrinsics, PlaneAnchor, Quad, Viewport};
use touch_rect::{SelectionParams, Session};

fn sheet_of_paper(_frame: &Frame) -> Vec<Quad> {
    // A4-ish sheet slightly left of center, in normalized coordinates.
    vec![Quad::new(
        Point2::new(0.30, 0.62),
        Point2::new(0.55, 0.64),
        Point2::new(0.56, 0.38),
        Point2::new(0.31, 0.36),
    )]
}

fn frame(id: u64) -> Frame {
    let down = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::FRAC_PI_2);
    let camera = Camera::new(
        Intrinsics::default(),
        Isometry3::from_parts(Translation3::new(0.0, 0.8, 0.0), down),
    );
    let floor = PlaneAnchor::horizontal(1, Point3::origin(), Vector2::new(3.0, 3.0));
    Frame::new(id, id as f64 / 60.0, camera).with_planes(vec![floor])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    touch_rect::core::init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    touch_rect::core::init_from_env(log::LevelFilter::Info)?;

    let viewport = Viewport::new(390.0, 844.0);
    let mut session = Session::with_detector(viewport, sheet_of_paper, SelectionParams::default())?;

    session.push_frame(frame(0).into_ref());
    session.touch_down(Point2::new(160.0, 420.0));
    println!("{}", session.message().map(|m| m.text()).unwrap_or_default());

    for id in 1..30 {
        session.push_frame(frame(id).into_ref());
        session.pump();
        std::thread::sleep(Duration::from_millis(16));
    }
    if let Some(outcome) = session.wait_for_detection(Duration::from_millis(100)) {
        println!("late detection: {outcome:?}");
    }

    let placed = session.touch_up();
    println!("release: {placed:?}");
    println!("{}", session.message().map(|m| m.text()).unwrap_or_default());
    for (id, object) in session.registry().iter() {
        println!(
            "{id}: {:.3} x {:.3} m on plane {} at {:?}",
            object.rect.size.x, object.rect.size.y, object.rect.plane_id, object.rect.center
        );
    }
    Ok(())
}
