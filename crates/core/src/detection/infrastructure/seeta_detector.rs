use std::path::Path;

use crate::detection::domain::face_detector::{DetectorError, FaceDetector};
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Classical sliding-window cascade detector backed by `rustface`
/// (the SeetaFace frontal-face engine).
///
/// The constants are tuned to be permissive for a single well-lit frontal
/// webcam face; they carry no further semantic weight.
pub struct SeetaFaceDetector {
    model: rustface::Model,
}

/// Faces smaller than this many pixels per side are ignored.
const MIN_FACE_SIZE: u32 = 40;
const SCORE_THRESH: f64 = 2.0;
const PYRAMID_SCALE_FACTOR: f32 = 0.8;
const SLIDE_WINDOW_STEP: u32 = 4;

impl SeetaFaceDetector {
    pub fn from_model_file(path: &Path) -> Result<Self, DetectorError> {
        let bytes = std::fs::read(path).map_err(|e| {
            DetectorError::Backend(format!("cannot read cascade model {}: {e}", path.display()))
        })?;
        let model = rustface::read_model(std::io::Cursor::new(bytes))
            .map_err(|e| DetectorError::Backend(format!("cannot parse cascade model: {e}")))?;
        Ok(Self { model })
    }
}

impl FaceDetector for SeetaFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, DetectorError> {
        let gray = frame.to_luma();

        // rustface detectors hold per-image pyramid state; building one per
        // call from the parsed model keeps `self` reusable across requests.
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESH);
        detector.set_pyramid_scale_factor(PYRAMID_SCALE_FACTOR);
        detector.set_slide_window_step(SLIDE_WINDOW_STEP, SLIDE_WINDOW_STEP);

        let image = rustface::ImageData::new(&gray, frame.width(), frame.height());
        let faces = detector.detect(&image);

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceRegion {
                    x: bbox.x(),
                    y: bbox.y(),
                    width: bbox.width() as i32,
                    height: bbox.height() as i32,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file_is_reported() {
        let err = SeetaFaceDetector::from_model_file(Path::new("/nonexistent/model.bin"))
            .err()
            .expect("missing file must fail");
        assert!(err.to_string().contains("cannot read cascade model"));
    }

    #[test]
    fn test_garbage_model_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, b"not a seeta model").unwrap();
        let err = SeetaFaceDetector::from_model_file(&path)
            .err()
            .expect("garbage model must fail");
        assert!(err.to_string().contains("cannot parse cascade model"));
    }
}
