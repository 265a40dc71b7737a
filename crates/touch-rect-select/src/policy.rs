//! Choosing the candidate under the finger.

use nalgebra::Point2;
use touch_rect_core::Quad;

use crate::{ContainmentMode, TieBreak};

/// Index of the candidate selected for `touch`, or `None` when no candidate
/// contains it.
///
/// `to_screen` maps normalized detector points to screen space, where
/// `touch` lives. Candidates are tested in detector order.
pub fn select_candidate(
    candidates: &[Quad],
    touch: Point2<f32>,
    to_screen: impl Fn(Point2<f32>) -> Point2<f32>,
    containment: ContainmentMode,
    tie_break: TieBreak,
) -> Option<usize> {
    let mut hits = candidates.iter().enumerate().filter_map(|(idx, quad)| {
        let screen = quad.map(&to_screen);
        let inside = match containment {
            ContainmentMode::Quad => screen.contains(touch),
            ContainmentMode::BoundingBox => screen.bounding_box().contains(touch),
        };
        inside.then(|| (idx, screen.area()))
    });

    match tie_break {
        TieBreak::FirstInOrder => hits.next().map(|(idx, _)| idx),
        TieBreak::SmallestArea => hits
            .min_by(|(ia, a), (ib, b)| a.total_cmp(b).then(ia.cmp(ib)))
            .map(|(idx, _)| idx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Quad {
        Quad::new(
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        )
    }

    fn identity(p: Point2<f32>) -> Point2<f32> {
        p
    }

    #[test]
    fn first_containing_candidate_wins() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 20.0, 60.0, 60.0);
        let c = rect(25.0, 25.0, 35.0, 35.0);
        let touch = Point2::new(30.0, 30.0);
        let idx = select_candidate(
            &[a, b, c],
            touch,
            identity,
            ContainmentMode::Quad,
            TieBreak::FirstInOrder,
        );
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn smallest_area_prefers_inner_candidate() {
        let b = rect(20.0, 20.0, 60.0, 60.0);
        let c = rect(25.0, 25.0, 35.0, 35.0);
        let idx = select_candidate(
            &[b, c],
            Point2::new(30.0, 30.0),
            identity,
            ContainmentMode::Quad,
            TieBreak::SmallestArea,
        );
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn smallest_area_ties_keep_detector_order() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 15.0, 15.0);
        let idx = select_candidate(
            &[a, b],
            Point2::new(7.0, 7.0),
            identity,
            ContainmentMode::Quad,
            TieBreak::SmallestArea,
        );
        assert_eq!(idx, Some(0));
    }

    #[test]
    fn no_candidate_contains_touch() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let idx = select_candidate(
            &[a],
            Point2::new(50.0, 50.0),
            identity,
            ContainmentMode::Quad,
            TieBreak::FirstInOrder,
        );
        assert_eq!(idx, None);
        assert_eq!(
            select_candidate(
                &[],
                Point2::new(0.0, 0.0),
                identity,
                ContainmentMode::Quad,
                TieBreak::FirstInOrder
            ),
            None
        );
    }

    #[test]
    fn bounding_box_mode_accepts_corner_of_skewed_quad() {
        let diamond = Quad::new(
            Point2::new(50.0, 0.0),
            Point2::new(100.0, 50.0),
            Point2::new(50.0, 100.0),
            Point2::new(0.0, 50.0),
        );
        let corner = Point2::new(5.0, 5.0);
        assert_eq!(
            select_candidate(
                &[diamond],
                corner,
                identity,
                ContainmentMode::Quad,
                TieBreak::FirstInOrder
            ),
            None
        );
        assert_eq!(
            select_candidate(
                &[diamond],
                corner,
                identity,
                ContainmentMode::BoundingBox,
                TieBreak::FirstInOrder
            ),
            Some(0)
        );
    }

    #[test]
    fn containment_is_tested_in_screen_space() {
        // Normalized square in the upper-left quarter of the image.
        let n = rect(0.0, 0.5, 0.5, 1.0);
        let to_screen = |p: Point2<f32>| Point2::new(p.x * 200.0, (1.0 - p.y) * 100.0);
        assert_eq!(
            select_candidate(
                &[n],
                Point2::new(50.0, 25.0),
                to_screen,
                ContainmentMode::Quad,
                TieBreak::FirstInOrder
            ),
            Some(0)
        );
        assert_eq!(
            select_candidate(
                &[n],
                Point2::new(50.0, 75.0),
                to_screen,
                ContainmentMode::Quad,
                TieBreak::FirstInOrder
            ),
            None
        );
    }
}
