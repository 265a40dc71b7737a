mod common;

use common::{frame_with_floor, init_logs, scenario, screen_rect, step};
use touch_rect::io::Action;
use touch_rect::replay::{replay, StepOutcome};
use touch_rect::select::RequestId;
use touch_rect::{DetectionOutcome, FinalizeOutcome, Message, PresentationEvent, SelectionPhase};

fn candidates() -> Action {
    Action::Detect {
        candidates: vec![
            screen_rect(0.0, 0.0, 10.0, 10.0),
            screen_rect(40.0, 40.0, 60.0, 60.0),
        ],
    }
}

#[test]
fn hold_detect_release() {
    init_logs();
    let report = replay(&scenario(
        vec![frame_with_floor(1)],
        vec![
            step(0.0, Action::Frame { frame: 1 }),
            step(0.1, Action::TouchDown { x: 50.0, y: 50.0 }),
            step(0.2, candidates()),
            step(0.4, Action::TouchUp),
        ],
    ))
    .expect("replay");

    let outcomes: Vec<_> = report.steps.iter().map(|s| s.outcome.clone()).collect();
    assert_eq!(outcomes[0], StepOutcome::NoDispatch);
    assert_eq!(outcomes[1], StepOutcome::Dispatched(RequestId(0)));
    assert_eq!(
        outcomes[2],
        StepOutcome::Detection(DetectionOutcome::Selected { index: 1 })
    );
    assert!(matches!(
        outcomes[3],
        StepOutcome::Released(Some(FinalizeOutcome::Placed(_)))
    ));

    assert_eq!(report.placements.len(), 1);
    assert_eq!(report.placements[0].source, screen_rect(40.0, 40.0, 60.0, 60.0));
    assert_eq!(report.final_message, Some(Message::HoldToSelect));
    assert_eq!(report.final_phase, SelectionPhase::Idle);

    let drawn = report
        .events
        .iter()
        .filter(|e| matches!(e, PresentationEvent::DrawOutline { .. }))
        .count();
    let erased = report
        .events
        .iter()
        .filter(|e| matches!(e, PresentationEvent::RemoveOutline { .. }))
        .count();
    assert_eq!((drawn, erased), (1, 1));
}

#[test]
fn release_before_detection_finishes_finalizes_once() {
    init_logs();
    let report = replay(&scenario(
        vec![frame_with_floor(1)],
        vec![
            step(0.0, Action::Frame { frame: 1 }),
            step(0.1, Action::TouchDown { x: 50.0, y: 50.0 }),
            step(0.15, Action::TouchUp),
            step(0.3, candidates()),
        ],
    ))
    .expect("replay");

    assert_eq!(report.steps[2].outcome, StepOutcome::Released(None));
    assert!(matches!(
        report.steps[3].outcome,
        StepOutcome::Detection(DetectionOutcome::Finalized {
            index: 1,
            outcome: FinalizeOutcome::Placed(_)
        })
    ));
    assert_eq!(report.placements.len(), 1);
    let placed = report
        .events
        .iter()
        .filter(|e| matches!(e, PresentationEvent::PlaceObject { .. }))
        .count();
    assert_eq!(placed, 1);
}

#[test]
fn frame_ticks_respect_debounce() {
    init_logs();
    let report = replay(&scenario(
        vec![frame_with_floor(1), frame_with_floor(2), frame_with_floor(3)],
        vec![
            step(0.0, Action::Frame { frame: 1 }),
            step(0.0, Action::TouchDown { x: 50.0, y: 50.0 }),
            step(0.1, candidates()),
            step(0.6, Action::Frame { frame: 2 }),
            step(1.25, Action::Frame { frame: 3 }),
            step(1.3, candidates()),
        ],
    ))
    .expect("replay");

    assert_eq!(report.steps[3].outcome, StepOutcome::NoDispatch);
    assert_eq!(report.steps[4].outcome, StepOutcome::Dispatched(RequestId(1)));
    assert_eq!(
        report.steps[5].outcome,
        StepOutcome::Detection(DetectionOutcome::Selected { index: 1 })
    );
    assert_eq!(report.final_phase, SelectionPhase::Tracking);
}

#[test]
fn stuck_detection_is_abandoned_after_timeout() {
    init_logs();
    let mut sc = scenario(
        vec![frame_with_floor(1)],
        vec![
            step(0.0, Action::Frame { frame: 1 }),
            step(0.0, Action::TouchDown { x: 50.0, y: 50.0 }),
            step(1.0, Action::TouchMove { x: 51.0, y: 51.0 }),
            step(3.0, Action::Frame { frame: 1 }),
            step(3.1, Action::TouchMove { x: 52.0, y: 52.0 }),
            step(3.2, candidates()),
        ],
    );
    sc.config.selection.request_timeout_s = Some(2.0);
    let report = replay(&sc).expect("replay");

    assert_eq!(report.steps[2].outcome, StepOutcome::NoDispatch);
    assert_eq!(report.steps[3].outcome, StepOutcome::NoDispatch);
    assert_eq!(report.steps[4].outcome, StepOutcome::Dispatched(RequestId(1)));
    assert_eq!(
        report.steps[5].outcome,
        StepOutcome::Detection(DetectionOutcome::Selected { index: 1 })
    );
}

#[test]
fn restart_removes_placements() {
    init_logs();
    let report = replay(&scenario(
        vec![frame_with_floor(1)],
        vec![
            step(0.0, Action::Frame { frame: 1 }),
            step(0.1, Action::TouchDown { x: 50.0, y: 50.0 }),
            step(0.2, candidates()),
            step(0.3, Action::TouchUp),
            step(0.5, Action::Restart),
            step(0.6, Action::Clear),
        ],
    ))
    .expect("replay");

    assert!(report.placements.is_empty());
    assert_eq!(report.final_message, Some(Message::FindSurface));
    let removed = report
        .events
        .iter()
        .filter(|e| matches!(e, PresentationEvent::RemoveObject { .. }))
        .count();
    assert_eq!(removed, 1);
}
