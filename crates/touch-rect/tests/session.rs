mod common;

use std::sync::mpsc;
use std::time::Duration;

use common::{frame_with_floor, frame_without_planes, init_logs, screen_rect, VIEW};
use nalgebra::Point2;
use touch_rect::core::{Frame, Viewport};
use touch_rect::{DetectionOutcome, FinalizeOutcome, Message, SelectionParams, SelectionPhase, Session};

const WAIT: Duration = Duration::from_secs(5);

fn paper_detector(_frame: &Frame) -> Vec<touch_rect::core::Quad> {
    vec![
        screen_rect(0.0, 0.0, 10.0, 10.0),
        screen_rect(40.0, 40.0, 60.0, 60.0),
    ]
}

fn session(params: SelectionParams) -> Session {
    Session::with_detector(Viewport::new(VIEW, VIEW), paper_detector, params).expect("spawn")
}

#[test]
fn hold_and_release_places_rectangle() {
    init_logs();
    let mut s = session(SelectionParams::default());
    assert!(!s.push_frame(frame_with_floor(1).into_ref()));

    assert!(s.touch_down(Point2::new(50.0, 50.0)));
    assert_eq!(s.message(), Some(Message::ReleaseToPlace));
    assert_eq!(s.phase(), SelectionPhase::Searching);

    let outcome = s.wait_for_detection(WAIT).expect("detection finished");
    assert_eq!(outcome, DetectionOutcome::Selected { index: 1 });
    assert_eq!(s.phase(), SelectionPhase::Tracking);
    assert_eq!(s.presenter().visible_outlines(), 1);

    let placed = s.touch_up().expect("finalized");
    assert!(matches!(placed, FinalizeOutcome::Placed(_)));
    assert_eq!(s.registry().len(), 1);
    assert_eq!(s.presenter().visible_objects(), 1);
    assert_eq!(s.presenter().visible_outlines(), 0);
    assert_eq!(s.message(), Some(Message::HoldToSelect));

    let (_, object) = s.registry().iter().next().expect("one placement");
    assert_eq!(object.rect.plane_id, 7);
    approx::assert_relative_eq!(object.rect.size.x, 0.2, epsilon = 1e-4);

    s.restart();
    assert!(s.registry().is_empty());
    assert_eq!(s.presenter().visible_objects(), 0);
    assert_eq!(s.message(), Some(Message::FindSurface));
}

#[test]
fn release_while_detecting_places_on_completion() {
    init_logs();
    let (gate_tx, gate_rx) = mpsc::channel::<()>();
    let gated = move |frame: &Frame| {
        let _ = gate_rx.recv();
        paper_detector(frame)
    };
    let mut s = Session::with_detector(
        Viewport::new(VIEW, VIEW),
        gated,
        SelectionParams::default(),
    )
    .expect("spawn");
    s.push_frame(frame_with_floor(1).into_ref());

    assert!(s.touch_down(Point2::new(50.0, 50.0)));
    assert!(!s.touch_move(Point2::new(52.0, 52.0)), "single flight");
    assert_eq!(s.touch_up(), None);
    assert!(s.registry().is_empty());

    gate_tx.send(()).expect("worker alive");
    let outcome = s.wait_for_detection(WAIT).expect("detection finished");
    assert!(matches!(
        outcome,
        DetectionOutcome::Finalized {
            index: 1,
            outcome: FinalizeOutcome::Placed(_)
        }
    ));
    assert_eq!(s.registry().len(), 1);
    assert!(s.pump().is_empty());
}

#[test]
fn missing_plane_is_reported() {
    init_logs();
    let mut s = session(SelectionParams::default());
    s.push_frame(frame_without_planes(1).into_ref());
    assert!(s.touch_down(Point2::new(50.0, 50.0)));
    s.wait_for_detection(WAIT).expect("detection finished");

    assert_eq!(s.touch_up(), Some(FinalizeOutcome::NoPlane));
    assert_eq!(s.message(), Some(Message::NoPlaneForRectangle));
    assert!(s.registry().is_empty());
}

#[test]
fn touch_outside_candidates_reports_no_rectangle() {
    init_logs();
    let mut s = session(SelectionParams::default());
    s.push_frame(frame_with_floor(1).into_ref());
    assert!(s.touch_down(Point2::new(90.0, 90.0)));
    let outcome = s.wait_for_detection(WAIT).expect("detection finished");
    assert_eq!(outcome, DetectionOutcome::NoMatch { candidates: 2 });
    assert_eq!(s.message(), Some(Message::NoRectangleFound));
    assert_eq!(s.touch_up(), None);
}

#[test]
fn held_selection_is_revalidated_on_new_frames() {
    init_logs();
    let params = SelectionParams {
        debounce_interval_s: 0.0,
        ..SelectionParams::default()
    };
    let mut s = session(params);
    s.push_frame(frame_with_floor(1).into_ref());
    assert!(s.touch_down(Point2::new(50.0, 50.0)));
    s.wait_for_detection(WAIT).expect("first pass");

    assert!(s.push_frame(frame_with_floor(2).into_ref()));
    assert!(!s.push_frame(frame_with_floor(3).into_ref()), "still in flight");
    let outcome = s.wait_for_detection(WAIT).expect("second pass");
    assert_eq!(outcome, DetectionOutcome::Selected { index: 1 });
}
