use serde::Serialize;

/// An axis-aligned face bounding box in pixel coordinates.
///
/// Serializes with the abbreviated `w`/`h` keys used by the client overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "h")]
    pub height: i32,
}

impl FaceRegion {
    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    /// Picks the largest-area region; ties keep the earliest.
    ///
    /// This is the pipeline's deterministic tie-break for multi-face frames,
    /// preferred over relying on the detector's scan order.
    pub fn largest(regions: &[FaceRegion]) -> Option<FaceRegion> {
        regions
            .iter()
            .copied()
            .reduce(|best, r| if r.area() > best.area() { r } else { best })
    }

    /// Intersects the region with a `frame_width` x `frame_height` frame.
    ///
    /// Returns `None` when nothing of the region lies inside the frame.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Option<FaceRegion> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(frame_width as i32);
        let y2 = (self.y + self.height).min(frame_height as i32);

        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(FaceRegion {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn region(x: i32, y: i32, w: i32, h: i32) -> FaceRegion {
        FaceRegion {
            x,
            y,
            width: w,
            height: h,
        }
    }

    // ── area ─────────────────────────────────────────────────────────

    #[test]
    fn test_area() {
        assert_eq!(region(10, 10, 200, 220).area(), 44_000);
    }

    #[rstest]
    #[case::zero_width(region(0, 0, 0, 100))]
    #[case::negative_width(region(0, 0, -5, 100))]
    #[case::negative_height(region(0, 0, 100, -5))]
    fn test_degenerate_area_is_zero(#[case] r: FaceRegion) {
        assert_eq!(r.area(), 0);
    }

    // ── largest ──────────────────────────────────────────────────────

    #[test]
    fn test_largest_empty() {
        assert_eq!(FaceRegion::largest(&[]), None);
    }

    #[test]
    fn test_largest_picks_biggest_area() {
        let regions = [region(0, 0, 50, 50), region(100, 0, 120, 130), region(0, 100, 30, 30)];
        assert_eq!(FaceRegion::largest(&regions), Some(regions[1]));
    }

    #[test]
    fn test_largest_tie_keeps_earliest() {
        let regions = [region(0, 0, 50, 50), region(100, 100, 50, 50)];
        assert_eq!(FaceRegion::largest(&regions), Some(regions[0]));
    }

    // ── clamped ──────────────────────────────────────────────────────

    #[test]
    fn test_clamped_inside_is_unchanged() {
        let r = region(10, 20, 30, 40);
        assert_eq!(r.clamped(640, 480), Some(r));
    }

    #[test]
    fn test_clamped_trims_overhang() {
        let r = region(600, 450, 100, 100);
        assert_eq!(r.clamped(640, 480), Some(region(600, 450, 40, 30)));
    }

    #[test]
    fn test_clamped_trims_negative_origin() {
        let r = region(-20, -10, 100, 100);
        assert_eq!(r.clamped(640, 480), Some(region(0, 0, 80, 90)));
    }

    #[rstest]
    #[case::fully_right(region(640, 0, 50, 50))]
    #[case::fully_below(region(0, 480, 50, 50))]
    #[case::fully_negative(region(-100, -100, 50, 50))]
    fn test_clamped_outside_returns_none(#[case] r: FaceRegion) {
        assert_eq!(r.clamped(640, 480), None);
    }

    // ── serialization ────────────────────────────────────────────────

    #[test]
    fn test_serializes_with_short_keys() {
        let json = serde_json::to_value(region(100, 80, 200, 220)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"x": 100, "y": 80, "w": 200, "h": 220})
        );
    }
}
