use super::*;
use crate::model::contour::{Color, Point};

#[test]
fn stats_count_empty_contours_separately() {
    let frame = Frame::new(vec![
        Contour::new(
            Color::White,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
        ),
        Contour::new(Color::Black, vec![]),
        Contour::new(Color::Black, vec![Point::new(4.0, 4.0)]),
    ]);

    assert_eq!(
        frame.stats(),
        FrameStats {
            contours: 3,
            drawable_contours: 2,
            points: 4,
        }
    );
}

#[test]
fn empty_frame_has_zero_stats() {
    let frame = Frame::empty();
    assert!(frame.is_empty());
    assert_eq!(frame.stats(), FrameStats::default());
    assert_eq!(frame, Frame::default());
}

#[test]
fn iteration_preserves_insertion_order() {
    let frame = Frame::new(vec![
        Contour::new(Color::Black, vec![Point::new(1.0, 1.0)]),
        Contour::new(Color::White, vec![Point::new(2.0, 2.0)]),
    ]);
    let xs: Vec<f32> = (&frame).into_iter().map(|c| c.points[0].x).collect();
    assert_eq!(xs, vec![1.0, 2.0]);
    assert_eq!(frame.iter().count(), frame.len());
}
