//! High-level facade crate for the `touch-rect-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry crate (`core`) and the selection engine
//!   (`select`)
//! - [`Session`], a live driver that runs detection on a worker thread
//! - [`RecordingPresenter`], a headless presenter that records every side
//!   effect
//! - JSON configuration and scenario files ([`io`]) and deterministic
//!   scenario replay ([`replay`])
//!
//! ## Quickstart
//!
//! ```no_run
//! use std::time::Duration;
//! use nalgebra::{Isometry3, Point2};
//! use touch_rect::core::{Camera, Frame, Intrinsics, Quad, Viewport};
//! use touch_rect::{SelectionParams, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = |_frame: &Frame| Vec::<Quad>::new();
//! let mut session = Session::with_detector(
//!     Viewport::new(390.0, 844.0),
//!     detector,
//!     SelectionParams::default(),
//! )?;
//! let camera = Camera::new(Intrinsics::default(), Isometry3::identity());
//! session.push_frame(Frame::new(0, 0.0, camera).into_ref());
//! session.touch_down(Point2::new(120.0, 300.0));
//! session.wait_for_detection(Duration::from_millis(200));
//! println!("{:?}", session.message());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `touch_rect::core`: points, quads, viewport, camera, plane anchors,
//!   plane projection, logger.
//! - `touch_rect::select`: the selection engine, its collaborator traits and
//!   the detection worker.
//! - `touch_rect::io`: `EngineConfig` and `Scenario` JSON files.
//! - `touch_rect::replay`: run a `Scenario` and produce a `ReplayReport`.

pub use touch_rect_core as core;
pub use touch_rect_select as select;

pub use touch_rect_select::{
    DetectionOutcome, FinalizeOutcome, Message, SelectionEngine, SelectionParams, SelectionPhase,
};

pub mod io;
mod presenter;
pub mod replay;
mod scene;
mod session;

pub use presenter::{PresentationEvent, RecordingPresenter};
pub use scene::LiveScene;
pub use session::Session;
