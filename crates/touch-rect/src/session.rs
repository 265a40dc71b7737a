//! Live driver: a [`SelectionEngine`] wired to a [`DetectionWorker`].

use std::time::{Duration, Instant};

use nalgebra::Point2;
use touch_rect_core::{FrameRef, Viewport};
use touch_rect_select::{
    AnchoredPlaneProjector, DetectionOutcome, DetectionRequest, DetectionWorker, FinalizeOutcome,
    Message, PlacementRegistry, PlaneProjector, Presenter, RectangleDetector, SelectionEngine,
    SelectionParams, SelectionPhase,
};

use crate::{LiveScene, RecordingPresenter};

/// Event-thread side of a live selection session.
///
/// Touch and frame events go in through the `touch_*` and
/// [`push_frame`](Self::push_frame) methods; detection runs on the worker
/// thread; [`pump`](Self::pump) hands finished detections back to the
/// engine. Every method must be called from the same thread.
pub struct Session<P = AnchoredPlaneProjector, S = RecordingPresenter> {
    engine: SelectionEngine<LiveScene, P, S>,
    worker: DetectionWorker,
}

impl Session {
    /// Session with the anchored-plane projector and a recording presenter.
    pub fn with_detector<D>(
        viewport: Viewport,
        detector: D,
        params: SelectionParams,
    ) -> std::io::Result<Self>
    where
        D: RectangleDetector + Send + 'static,
    {
        Self::new(
            viewport,
            detector,
            AnchoredPlaneProjector,
            RecordingPresenter::new(),
            params,
        )
    }
}

impl<P, S> Session<P, S>
where
    P: PlaneProjector,
    S: Presenter,
{
    pub fn new<D>(
        viewport: Viewport,
        detector: D,
        projector: P,
        presenter: S,
        params: SelectionParams,
    ) -> std::io::Result<Self>
    where
        D: RectangleDetector + Send + 'static,
    {
        let worker = DetectionWorker::spawn(detector)?;
        let engine = SelectionEngine::new(LiveScene::new(viewport), projector, presenter, params);
        Ok(Self { engine, worker })
    }

    pub fn engine(&self) -> &SelectionEngine<LiveScene, P, S> {
        &self.engine
    }

    pub fn presenter(&self) -> &S {
        self.engine.presenter()
    }

    pub fn registry(&self) -> &PlacementRegistry {
        self.engine.registry()
    }

    pub fn message(&self) -> Option<Message> {
        self.engine.message()
    }

    pub fn phase(&self) -> SelectionPhase {
        self.engine.phase()
    }

    /// Make `frame` current and run the periodic re-validation tick.
    pub fn push_frame(&mut self, frame: FrameRef) -> bool {
        self.engine.scene_mut().set_frame(frame);
        let request = self.engine.on_frame_update(Instant::now());
        self.submit(request)
    }

    /// Returns `true` when a detection pass was started.
    pub fn touch_down(&mut self, point: Point2<f32>) -> bool {
        let request = self.engine.on_touch_down(point, Instant::now());
        self.submit(request)
    }

    pub fn touch_move(&mut self, point: Point2<f32>) -> bool {
        let request = self.engine.on_touch_move(point, Instant::now());
        self.submit(request)
    }

    pub fn touch_up(&mut self) -> Option<FinalizeOutcome> {
        self.engine.on_touch_up()
    }

    /// Apply every detection the worker has finished so far.
    pub fn pump(&mut self) -> Vec<DetectionOutcome> {
        let mut outcomes = Vec::new();
        while let Some(response) = self.worker.try_recv() {
            outcomes.push(self.engine.detection_completed(response, Instant::now()));
        }
        outcomes
    }

    /// Block up to `timeout` for the next finished detection and apply it.
    pub fn wait_for_detection(&mut self, timeout: Duration) -> Option<DetectionOutcome> {
        let response = self.worker.recv_timeout(timeout)?;
        Some(self.engine.detection_completed(response, Instant::now()))
    }

    pub fn clear_all(&mut self) {
        self.engine.clear_all();
    }

    pub fn restart(&mut self) {
        self.engine.restart();
    }

    fn submit(&self, request: Option<DetectionRequest>) -> bool {
        let Some(request) = request else {
            return false;
        };
        let id = request.id;
        if !self.worker.submit(request) {
            log::error!("detection worker is gone; request {id} dropped");
            return false;
        }
        true
    }
}
