//! Touch-driven selection state machine.

use std::time::Instant;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use touch_rect_core::{FrameRef, Quad};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::state::InFlight;
use crate::{
    select_candidate, DetectionRequest, DetectionResponse, Message, OutlineHandle, PlacedObject,
    PlacementId, PlacementRegistry, PlaneProjector, Presenter, RequestId, SceneView,
    SelectionFailure, SelectionParams, SelectionPhase, SelectionState,
};

/// What a completed detection pass did to the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionOutcome {
    /// The response does not belong to the in-flight request and was ignored.
    Stale,
    /// The detector returned no candidates.
    NoCandidates,
    /// No candidate contained the touch point.
    NoMatch { candidates: usize },
    /// Candidate `index` is now the active selection.
    Selected { index: usize },
    /// Candidate `index` was selected after the finger had already lifted,
    /// and was finalized straight away.
    Finalized {
        index: usize,
        outcome: FinalizeOutcome,
    },
}

/// Result of lifting the active selection into the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeOutcome {
    Placed(PlacementId),
    NoPlane,
}

/// Selection state machine plus the collaborators it drives.
///
/// All entry points are meant to be called from one thread, the one that
/// delivers touch and frame events. Detection runs elsewhere: entry points
/// hand out a [`DetectionRequest`] and the result comes back through
/// [`detection_completed`](Self::detection_completed).
pub struct SelectionEngine<V, P, S> {
    scene: V,
    projector: P,
    presenter: S,
    params: SelectionParams,
    state: SelectionState,
    registry: PlacementRegistry,
    outline: Option<OutlineHandle>,
    message: Option<Message>,
    next_request: u64,
}

impl<V, P, S> SelectionEngine<V, P, S>
where
    V: SceneView,
    P: PlaneProjector,
    S: Presenter,
{
    pub fn new(scene: V, projector: P, presenter: S, params: SelectionParams) -> Self {
        Self {
            scene,
            projector,
            presenter,
            params,
            state: SelectionState::default(),
            registry: PlacementRegistry::new(),
            outline: None,
            message: None,
            next_request: 0,
        }
    }

    #[inline]
    pub fn params(&self) -> &SelectionParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    #[inline]
    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    /// Current content of the message slot.
    #[inline]
    pub fn message(&self) -> Option<Message> {
        self.message
    }

    /// Outline currently drawn for the selection, if any.
    #[inline]
    pub fn outline(&self) -> Option<OutlineHandle> {
        self.outline
    }

    pub fn scene(&self) -> &V {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut V {
        &mut self.scene
    }

    pub fn presenter(&self) -> &S {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut S {
        &mut self.presenter
    }

    /// Finger down at `point` (screen space).
    ///
    /// Resets the selection and starts a detection pass unless one is
    /// already in flight. Ignored entirely while no frame is available.
    pub fn on_touch_down(&mut self, point: Point2<f32>, now: Instant) -> Option<DetectionRequest> {
        let frame = self.scene.current_frame()?;
        self.state.active = None;
        self.state.touch = Some(point);

        let request = if self.state.is_searching() {
            log::debug!("touch down while a detection is in flight; not dispatching");
            None
        } else {
            Some(self.dispatch(frame, point, now))
        };
        self.set_message(Some(Message::ReleaseToPlace));
        request
    }

    /// Finger moved to `point`.
    ///
    /// A no-op while a detection pass is in flight, so the detector sees at
    /// most one request per completed round trip.
    pub fn on_touch_move(&mut self, point: Point2<f32>, now: Instant) -> Option<DetectionRequest> {
        if self.state.is_searching() {
            return None;
        }
        let frame = self.scene.current_frame()?;
        self.state.touch = Some(point);
        Some(self.dispatch(frame, point, now))
    }

    /// Per-frame tick from scene tracking.
    ///
    /// Re-runs detection at the held touch location once the confirmed
    /// selection is older than the debounce interval. Also abandons an
    /// in-flight request that exceeded the configured timeout.
    pub fn on_frame_update(&mut self, now: Instant) -> Option<DetectionRequest> {
        self.expire_in_flight(now);
        if self.state.is_searching() {
            return None;
        }
        let touch = self.state.touch?;
        let confirmed_at = self.state.last_updated_at?;
        if now.saturating_duration_since(confirmed_at) < self.params.debounce_interval() {
            return None;
        }
        let frame = self.scene.current_frame()?;
        log::debug!("re-validating selection at ({:.1}, {:.1})", touch.x, touch.y);
        Some(self.dispatch(frame, touch, now))
    }

    /// Finger lifted.
    ///
    /// Finalizes the active selection if there is one. When the detection
    /// for this touch is still in flight, nothing is placed here; the
    /// completion finalizes instead. A release without a matching touch
    /// down is ignored.
    pub fn on_touch_up(&mut self) -> Option<FinalizeOutcome> {
        self.state.touch.take()?;
        self.set_message(Some(Message::HoldToSelect));
        let quad = self.state.active?;
        Some(self.finalize(quad))
    }

    /// Completion path of a detection pass.
    ///
    /// The result is judged against the touch point the request was
    /// dispatched with, then reconciled with the current state: if the
    /// finger has lifted in the meantime, a match is finalized at once.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, response, now),
            fields(request = %response.id, candidates = response.candidates.len())
        )
    )]
    pub fn detection_completed(
        &mut self,
        response: DetectionResponse,
        now: Instant,
    ) -> DetectionOutcome {
        match self.state.in_flight {
            Some(pending) if pending.id == response.id => {}
            _ => {
                log::warn!("ignoring stale detection result {}", response.id);
                return DetectionOutcome::Stale;
            }
        }
        self.state.in_flight = None;

        log::debug!(
            "detection {} returned {} candidates",
            response.id,
            response.candidates.len()
        );
        if response.candidates.is_empty() {
            self.drop_selection(SelectionFailure::NoRectangleFound);
            return DetectionOutcome::NoCandidates;
        }

        let scene = &self.scene;
        let picked = select_candidate(
            &response.candidates,
            response.touch,
            |p| scene.screen_from_normalized(p),
            self.params.containment,
            self.params.tie_break,
        );
        let Some(index) = picked else {
            self.drop_selection(SelectionFailure::NoRectangleFound);
            return DetectionOutcome::NoMatch {
                candidates: response.candidates.len(),
            };
        };

        let quad = response.candidates[index];
        self.clear_outline();
        let points = quad
            .map(|p| self.scene.screen_from_normalized(p))
            .corners();
        self.outline = Some(self.presenter.draw_outline(&points, &self.params.outline));
        self.state.active = Some(quad);
        self.state.last_updated_at = Some(now);

        if self.state.touch.is_none() {
            log::debug!("touch released during detection; finalizing candidate {index}");
            let outcome = self.finalize(quad);
            return DetectionOutcome::Finalized { index, outcome };
        }
        DetectionOutcome::Selected { index }
    }

    /// Remove every placed object. Tracking keeps running.
    pub fn clear_all(&mut self) {
        for (id, placed) in self.registry.remove_all() {
            log::debug!("removing {id}");
            self.presenter.remove_object(placed.handle);
        }
        self.state.active = None;
        self.clear_outline();
    }

    /// [`clear_all`](Self::clear_all), then prompt for a surface again.
    pub fn restart(&mut self) {
        self.clear_all();
        self.set_message(Some(Message::FindSurface));
    }

    fn dispatch(&mut self, frame: FrameRef, touch: Point2<f32>, now: Instant) -> DetectionRequest {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.state.in_flight = Some(InFlight {
            id,
            dispatched_at: now,
        });
        self.state.active = None;
        log::debug!(
            "dispatching detection {id} on frame {} at ({:.1}, {:.1})",
            frame.id,
            touch.x,
            touch.y
        );
        DetectionRequest { id, frame, touch }
    }

    fn expire_in_flight(&mut self, now: Instant) {
        let (Some(timeout), Some(pending)) = (self.params.request_timeout(), self.state.in_flight)
        else {
            return;
        };
        if now.saturating_duration_since(pending.dispatched_at) >= timeout {
            log::warn!(
                "detection {} exceeded {:.2}s; abandoning it",
                pending.id,
                timeout.as_secs_f64()
            );
            self.state.in_flight = None;
        }
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, quad)))]
    fn finalize(&mut self, quad: Quad) -> FinalizeOutcome {
        self.clear_outline();
        let rect = self
            .scene
            .current_frame()
            .and_then(|frame| self.projector.project(&quad, &frame));
        let Some(rect) = rect else {
            self.state.active = None;
            self.report(SelectionFailure::NoPlaneForRectangle);
            return FinalizeOutcome::NoPlane;
        };

        let handle = self.presenter.place_object(&rect);
        log::info!(
            "placed {:.3}x{:.3} rectangle on plane {}",
            rect.size.x,
            rect.size.y,
            rect.plane_id
        );
        let id = self.registry.register(PlacedObject {
            source: quad,
            rect,
            handle,
        });
        FinalizeOutcome::Placed(id)
    }

    fn drop_selection(&mut self, failure: SelectionFailure) {
        self.state.active = None;
        self.clear_outline();
        self.report(failure);
    }

    fn report(&mut self, failure: SelectionFailure) {
        log::debug!("{failure}");
        self.set_message(Some(failure.message()));
    }

    fn set_message(&mut self, message: Option<Message>) {
        self.message = message;
        self.presenter.set_message(message);
    }

    fn clear_outline(&mut self) {
        if let Some(handle) = self.outline.take() {
            self.presenter.remove_outline(handle);
        }
    }
}
