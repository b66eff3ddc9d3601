//! Synthetic 68-point facial landmark overlay.
//!
//! Points are placed by closed-form geometry from the face bounding box
//! alone and exist only for client-side rendering; they do not reflect
//! pixel content. Same box in, same 68 points out.

use std::f64::consts::PI;

use serde::Serialize;

use crate::shared::constants::LANDMARK_COUNT;
use crate::shared::region::FaceRegion;

/// A single overlay point in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Landmark {
    pub x: i32,
    pub y: i32,
}

/// Group sizes, in output order. They sum to [`LANDMARK_COUNT`].
pub const OUTLINE_POINTS: usize = 17;
pub const EYEBROW_POINTS: usize = 5;
pub const NOSE_BRIDGE_POINTS: usize = 4;
pub const NOSE_BASE_POINTS: usize = 5;
pub const EYE_POINTS: usize = 6;
pub const OUTER_MOUTH_POINTS: usize = 12;
pub const INNER_MOUTH_POINTS: usize = 8;

/// Produces the 68-point overlay for a face box.
///
/// Layout: jawline ring (17), left and right eyebrow rows (5 + 5), nose
/// bridge (4), nose base (5), left and right eye rings (6 + 6), outer and
/// inner mouth rings (12 + 8). All coordinates truncate toward zero.
pub fn synthesize(face: &FaceRegion) -> Vec<Landmark> {
    let (x, y) = (face.x as f64, face.y as f64);
    let (w, h) = (face.width as f64, face.height as f64);
    let mut points = Vec::with_capacity(LANDMARK_COUNT);

    // Jawline: an open ring swept across the lower face.
    for i in 0..OUTLINE_POINTS {
        let angle = i as f64 / 16.0 * PI;
        points.push(Landmark {
            x: (x + w / 2.0 + (w / 2.2) * (angle + PI).cos()) as i32,
            y: (y + h / 2.0 + (h / 1.5) * (angle + PI / 6.0).sin()) as i32,
        });
    }

    // Eyebrows: two horizontal five-point rows at 30% face height.
    for start in [0.25, 0.55] {
        for i in 0..EYEBROW_POINTS {
            points.push(Landmark {
                x: (x + w * (start + i as f64 * 0.05)) as i32,
                y: (y + h * 0.3) as i32,
            });
        }
    }

    // Nose: vertical bridge, then a five-point base row.
    for i in 0..NOSE_BRIDGE_POINTS {
        points.push(Landmark {
            x: (x + w / 2.0) as i32,
            y: (y + h * (0.35 + i as f64 * 0.08)) as i32,
        });
    }
    for i in 0..NOSE_BASE_POINTS {
        points.push(Landmark {
            x: (x + w * (0.35 + i as f64 * 0.075)) as i32,
            y: (y + h * 0.6) as i32,
        });
    }

    // Eyes: six-point rings around centers at 30% / 70% width, 40% height.
    let eye_y = face.y + (h * 0.4) as i32;
    for center_frac in [0.3, 0.7] {
        let eye_x = face.x + (w * center_frac) as i32;
        for i in 0..EYE_POINTS {
            let angle = i as f64 / EYE_POINTS as f64 * 2.0 * PI;
            points.push(Landmark {
                x: (eye_x as f64 + (w * 0.05) * angle.cos()) as i32,
                y: (eye_y as f64 + (h * 0.03) * angle.sin()) as i32,
            });
        }
    }

    // Mouth: two concentric rings around one center at 75% face height.
    let mouth_x = face.x + (w / 2.0) as i32;
    let mouth_y = face.y + (h * 0.75) as i32;
    for (count, rx, ry) in [
        (OUTER_MOUTH_POINTS, 0.15, 0.06),
        (INNER_MOUTH_POINTS, 0.10, 0.04),
    ] {
        for i in 0..count {
            let angle = i as f64 / count as f64 * 2.0 * PI;
            points.push(Landmark {
                x: (mouth_x as f64 + (w * rx) * angle.cos()) as i32,
                y: (mouth_y as f64 + (h * ry) * angle.sin()) as i32,
            });
        }
    }

    debug_assert_eq!(points.len(), LANDMARK_COUNT);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// The canonical scenario face: 640x480 frame, box at (100, 80, 200, 220).
    fn scenario_face() -> FaceRegion {
        FaceRegion {
            x: 100,
            y: 80,
            width: 200,
            height: 220,
        }
    }

    #[test]
    fn test_produces_exactly_68_points() {
        assert_eq!(synthesize(&scenario_face()).len(), 68);
    }

    #[test]
    fn test_group_sizes_sum_to_landmark_count() {
        assert_eq!(
            OUTLINE_POINTS
                + 2 * EYEBROW_POINTS
                + NOSE_BRIDGE_POINTS
                + NOSE_BASE_POINTS
                + 2 * EYE_POINTS
                + OUTER_MOUTH_POINTS
                + INNER_MOUTH_POINTS,
            LANDMARK_COUNT
        );
    }

    #[test]
    fn test_deterministic_for_same_region() {
        let face = scenario_face();
        assert_eq!(synthesize(&face), synthesize(&face));
    }

    #[test]
    fn test_all_points_non_negative_for_in_frame_face() {
        for p in synthesize(&scenario_face()) {
            assert!(p.x >= 0 && p.y >= 0, "negative coordinate in {p:?}");
        }
    }

    #[test]
    fn test_eyebrow_rows_are_horizontal() {
        let points = synthesize(&scenario_face());
        // Left brow: indices 17..22, right brow: 22..27. Both sit at 30%
        // face height: 80 + 220 * 0.3 = 146.
        for p in &points[17..27] {
            assert_eq!(p.y, 146);
        }
        // Left row starts at 25% width, right row at 55%.
        assert_eq!(points[17].x, 150);
        assert_eq!(points[22].x, 210);
    }

    #[test]
    fn test_nose_bridge_is_vertical_and_centered() {
        let points = synthesize(&scenario_face());
        let bridge = &points[27..31];
        for p in bridge {
            assert_eq!(p.x, 200);
        }
        // Descending rows at 35% + i * 8% face height.
        assert_eq!(bridge[0].y, 157);
        assert_eq!(bridge[3].y, 209);
        assert!(bridge.windows(2).all(|w| w[1].y > w[0].y));
    }

    #[test]
    fn test_nose_base_row() {
        let points = synthesize(&scenario_face());
        let base = &points[31..36];
        for p in base {
            assert_eq!(p.y, 212); // 80 + 220 * 0.6
        }
        assert_eq!(base[0].x, 170);
        assert_eq!(base[4].x, 230);
    }

    #[test]
    fn test_eye_rings_share_height_and_mirror_centers() {
        let points = synthesize(&scenario_face());
        let (left, right) = (&points[36..42], &points[42..48]);
        // First ring point sits at angle 0: center + horizontal radius.
        assert_eq!(left[0], Landmark { x: 170, y: 168 });
        assert_eq!(right[0], Landmark { x: 250, y: 168 });
        // Both rings are centered on the same row.
        let left_ys: Vec<i32> = left.iter().map(|p| p.y).collect();
        let right_ys: Vec<i32> = right.iter().map(|p| p.y).collect();
        assert_eq!(left_ys, right_ys);
    }

    #[test]
    fn test_mouth_rings_are_concentric() {
        let points = synthesize(&scenario_face());
        let (outer, inner) = (&points[48..60], &points[60..68]);
        // Angle-0 points: center (200, 245) plus the horizontal radius.
        assert_eq!(outer[0], Landmark { x: 230, y: 245 });
        assert_eq!(inner[0], Landmark { x: 220, y: 245 });
        // The inner ring never extends past the outer ring horizontally.
        let max_outer = outer.iter().map(|p| (p.x - 200).abs()).max().unwrap();
        let max_inner = inner.iter().map(|p| (p.x - 200).abs()).max().unwrap();
        assert!(max_inner < max_outer);
    }

    #[test]
    fn test_translation_moves_every_point() {
        let base = synthesize(&scenario_face());
        let shifted = synthesize(&FaceRegion {
            x: 100 + 40,
            y: 80 + 30,
            width: 200,
            height: 220,
        });
        for (a, b) in base.iter().zip(&shifted) {
            assert_eq!(b.x, a.x + 40);
            assert_eq!(b.y, a.y + 30);
        }
    }

    #[rstest]
    #[case::small(FaceRegion { x: 0, y: 0, width: 24, height: 24 })]
    #[case::wide(FaceRegion { x: 5, y: 5, width: 400, height: 100 })]
    #[case::tall(FaceRegion { x: 5, y: 5, width: 100, height: 400 })]
    fn test_point_count_independent_of_box_shape(#[case] face: FaceRegion) {
        assert_eq!(synthesize(&face).len(), 68);
    }

    #[test]
    fn test_serializes_as_xy_object() {
        let json = serde_json::to_value(Landmark { x: 3, y: 4 }).unwrap();
        assert_eq!(json, serde_json::json!({"x": 3, "y": 4}));
    }
}
