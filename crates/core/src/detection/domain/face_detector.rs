use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("face detector failed: {0}")]
    Backend(String),
}

/// Domain interface for face detection.
///
/// Zero returned regions is a valid outcome, not an error. Implementations
/// may keep mutable scratch state, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, DetectorError>;
}
