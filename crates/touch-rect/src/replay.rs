//! Deterministic, single-threaded scenario replay.
//!
//! Detection results come from the script itself (`detect` steps), so a
//! replay exercises the selection engine without a detector or threads.
//! Timestamps are taken from each step's `at` field.

use std::time::{Duration, Instant};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use touch_rect_core::{OrientedRect3D, Quad};
use touch_rect_select::{
    AnchoredPlaneProjector, DetectionOutcome, DetectionRequest, DetectionResponse,
    FinalizeOutcome, Message, PlacementId, RequestId, SelectionEngine, SelectionPhase,
};

use crate::io::{Action, Scenario};
use crate::{LiveScene, PresentationEvent, RecordingPresenter};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ReplayError {
    #[error("step {step}: invalid timestamp {at}")]
    InvalidTime { step: usize, at: f64 },
    #[error("step {step}: unknown frame {frame}")]
    UnknownFrame { step: usize, frame: u64 },
    #[error("step {step}: no detection request to complete")]
    NothingToDetect { step: usize },
}

/// What a single scripted step did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// A detection pass was started.
    Dispatched(RequestId),
    /// The event was accepted but started no detection.
    NoDispatch,
    Released(Option<FinalizeOutcome>),
    Detection(DetectionOutcome),
    Cleared,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub index: usize,
    pub at: f64,
    pub action: String,
    pub outcome: StepOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub id: PlacementId,
    pub source: Quad,
    pub rect: OrientedRect3D,
}

/// Everything a replay observed, ready to be written as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub steps: Vec<StepRecord>,
    pub placements: Vec<PlacementRecord>,
    pub final_message: Option<Message>,
    pub final_phase: SelectionPhase,
    pub events: Vec<PresentationEvent>,
}

impl ReplayReport {
    /// Number of `detect` steps whose outcome matched `pred`.
    pub fn count_detections(&self, pred: impl Fn(&DetectionOutcome) -> bool) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(&s.outcome, StepOutcome::Detection(o) if pred(o)))
            .count()
    }

    /// Number of finalizations that found no plane, whether on release or
    /// when a detection landed after the finger had lifted.
    pub fn no_plane_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| {
                matches!(
                    s.outcome,
                    StepOutcome::Released(Some(FinalizeOutcome::NoPlane))
                        | StepOutcome::Detection(DetectionOutcome::Finalized {
                            outcome: FinalizeOutcome::NoPlane,
                            ..
                        })
                )
            })
            .count()
    }
}

/// Run `scenario` against a fresh engine.
pub fn replay(scenario: &Scenario) -> Result<ReplayReport, ReplayError> {
    let mut engine = SelectionEngine::new(
        LiveScene::new(scenario.config.viewport.viewport()),
        AnchoredPlaneProjector,
        RecordingPresenter::new(),
        scenario.config.selection.clone(),
    );
    let origin = Instant::now();
    let mut pending: Option<DetectionRequest> = None;
    let mut steps = Vec::with_capacity(scenario.steps.len());

    for (index, step) in scenario.steps.iter().enumerate() {
        let now = Duration::try_from_secs_f64(step.at)
            .ok()
            .and_then(|offset| origin.checked_add(offset))
            .ok_or(ReplayError::InvalidTime {
                step: index,
                at: step.at,
            })?;

        let outcome = match &step.action {
            Action::TouchDown { x, y } => {
                dispatched(engine.on_touch_down(Point2::new(*x, *y), now), &mut pending)
            }
            Action::TouchMove { x, y } => {
                dispatched(engine.on_touch_move(Point2::new(*x, *y), now), &mut pending)
            }
            Action::TouchUp => StepOutcome::Released(engine.on_touch_up()),
            Action::Frame { frame } => {
                let spec = scenario
                    .frame(*frame)
                    .ok_or(ReplayError::UnknownFrame {
                        step: index,
                        frame: *frame,
                    })?;
                engine.scene_mut().set_frame(spec.to_frame().into_ref());
                dispatched(engine.on_frame_update(now), &mut pending)
            }
            Action::Detect { candidates } => {
                let request = pending
                    .take()
                    .ok_or(ReplayError::NothingToDetect { step: index })?;
                let response = DetectionResponse::new(&request, candidates.clone());
                StepOutcome::Detection(engine.detection_completed(response, now))
            }
            Action::Clear => {
                engine.clear_all();
                StepOutcome::Cleared
            }
            Action::Restart => {
                engine.restart();
                StepOutcome::Cleared
            }
        };
        log::debug!("step {index} ({}) -> {outcome:?}", step.action.name());
        steps.push(StepRecord {
            index,
            at: step.at,
            action: step.action.name().to_string(),
            outcome,
        });
    }

    let placements = engine
        .registry()
        .iter()
        .map(|(id, placed)| PlacementRecord {
            id,
            source: placed.source,
            rect: placed.rect.clone(),
        })
        .collect();
    let final_message = engine.message();
    let final_phase = engine.phase();
    let events = engine.presenter_mut().take_events();

    Ok(ReplayReport {
        steps,
        placements,
        final_message,
        final_phase,
        events,
    })
}

fn dispatched(
    request: Option<DetectionRequest>,
    pending: &mut Option<DetectionRequest>,
) -> StepOutcome {
    match request {
        Some(request) => {
            let id = request.id;
            // A newer request only exists once the older one was abandoned.
            *pending = Some(request);
            StepOutcome::Dispatched(id)
        }
        None => StepOutcome::NoDispatch,
    }
}
