//! Core types and utilities for touch-driven rectangle selection.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete rectangle detector, renderer, or AR runtime.
//!
//! Coordinate conventions:
//! - *normalized* points are what a rectangle detector reports: `[0, 1]²`,
//!   origin at the bottom-left of the camera image, y pointing up;
//! - *screen* points are view coordinates: origin at the top-left, y down;
//! - *world* points are metric 3D coordinates of the tracked scene.

mod camera;
mod frame;
mod geometry;
mod homography;
mod logger;
mod projection;
mod viewport;

pub use camera::{Camera, Intrinsics, PlaneAnchor, Ray};
pub use frame::{Frame, FrameError, FrameRef, GrayImage};
pub use geometry::{Aabb, Quad};
pub use homography::{homography_from_4pt, Homography};
pub use projection::{project_quad_onto_planes, OrientedRect3D};
pub use viewport::Viewport;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, LOG_ENV_VAR};
