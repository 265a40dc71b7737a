//! Interactive rectangle selection and plane placement.
//!
//! The engine tracks "the rectangle currently being selected" while a finger
//! is down. It asks a rectangle detector for candidates, keeps the first one
//! whose outline contains the touch point, re-validates it as the camera
//! moves, and on release lifts it onto a surface plane so a 3D object can be
//! attached to it.
//!
//! ## Quickstart
//!
//! ```
//! use std::time::Instant;
//! use nalgebra::{Isometry3, Point2};
//! use touch_rect_core::{Camera, Frame, FrameRef, Intrinsics, OrientedRect3D, Quad, Viewport};
//! use touch_rect_select::{
//!     AnchoredPlaneProjector, DetectionResponse, Message, ObjectHandle, OutlineHandle,
//!     OutlineStyle, Presenter, SceneView, SelectionEngine, SelectionParams,
//! };
//!
//! struct Scene {
//!     viewport: Viewport,
//!     frame: FrameRef,
//! }
//!
//! impl SceneView for Scene {
//!     fn current_frame(&self) -> Option<FrameRef> {
//!         Some(self.frame.clone())
//!     }
//!     fn screen_from_normalized(&self, p: Point2<f32>) -> Point2<f32> {
//!         self.viewport.to_screen(p)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Quiet(u64);
//!
//! impl Presenter for Quiet {
//!     fn set_message(&mut self, _message: Option<Message>) {}
//!     fn draw_outline(&mut self, _points: &[Point2<f32>; 4], _style: &OutlineStyle) -> OutlineHandle {
//!         self.0 += 1;
//!         OutlineHandle(self.0)
//!     }
//!     fn remove_outline(&mut self, _handle: OutlineHandle) {}
//!     fn place_object(&mut self, _rect: &OrientedRect3D) -> ObjectHandle {
//!         self.0 += 1;
//!         ObjectHandle(self.0)
//!     }
//!     fn remove_object(&mut self, _handle: ObjectHandle) {}
//! }
//!
//! let frame = Frame::new(0, 0.0, Camera::new(Intrinsics::default(), Isometry3::identity()));
//! let scene = Scene { viewport: Viewport::new(100.0, 100.0), frame: frame.into_ref() };
//! let mut engine = SelectionEngine::new(
//!     scene,
//!     AnchoredPlaneProjector,
//!     Quiet::default(),
//!     SelectionParams::default(),
//! );
//!
//! let now = Instant::now();
//! let request = engine.on_touch_down(Point2::new(50.0, 50.0), now).expect("dispatched");
//! // ... run the detector on `request.frame`, then report back:
//! let response = DetectionResponse::new(&request, Vec::<Quad>::new());
//! engine.detection_completed(response, now);
//! assert_eq!(engine.message(), Some(Message::NoRectangleFound));
//! ```
//!
//! ## Concurrency model
//!
//! The engine itself is synchronous and single-threaded. Touch and frame
//! entry points return a [`DetectionRequest`] when a detection pass should
//! start; the caller runs the detector (inline or on a
//! [`DetectionWorker`]) and feeds the [`DetectionResponse`] back through
//! [`SelectionEngine::detection_completed`] on the same thread that
//! delivers touches. At most one request is in flight at any time.

mod collaborators;
mod engine;
mod error;
mod message;
mod params;
mod policy;
mod registry;
mod request;
mod state;
mod worker;

pub use collaborators::{
    AnchoredPlaneProjector, ObjectHandle, OutlineHandle, PlaneProjector, Presenter,
    RectangleDetector, SceneView,
};
pub use engine::{DetectionOutcome, FinalizeOutcome, SelectionEngine};
pub use error::{RegistryError, SelectionFailure};
pub use message::Message;
pub use params::{ContainmentMode, OutlineStyle, SelectionParams, TieBreak};
pub use policy::select_candidate;
pub use registry::{PlacedObject, PlacementId, PlacementRegistry};
pub use request::{DetectionRequest, DetectionResponse, RequestId};
pub use state::{SelectionPhase, SelectionState};
pub use worker::DetectionWorker;
