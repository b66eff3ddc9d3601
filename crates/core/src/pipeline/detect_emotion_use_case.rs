use thiserror::Error;

use crate::catalog::domain::song_catalog::{CatalogError, Song, SongCatalog};
use crate::classification::domain::emotion::Emotion;
use crate::classification::domain::emotion_classifier::{EmotionClassifier, EmotionScores};
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::landmark_overlay::{self, Landmark};
use crate::history::domain::detection_history::{DetectionHistory, HistoryError, NewDetection};
use crate::shared::constants::CATALOG_LIMIT;
use crate::shared::region::FaceRegion;
use crate::snapshot::domain::snapshot_decoder::SnapshotDecoder;

/// The authenticated requester a detection is recorded against.
#[derive(Clone, Debug)]
pub struct UserIdentity {
    pub user_id: i32,
    pub email: String,
}

/// A completed detection, ready for response assembly.
#[derive(Clone, Debug)]
pub struct Detection {
    pub emotion: Emotion,
    pub scores: EmotionScores,
    pub face: FaceRegion,
    pub landmarks: Vec<Landmark>,
    pub songs: Vec<Song>,
}

/// Why a request ended on the soft path.
///
/// Clients see one uniform "no face" shape for all three; the cause is kept
/// apart here so logs and metrics can tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoftFailure {
    DecodeFailed,
    NoFaceFound,
    ClassifierFailed,
}

pub enum DetectionOutcome {
    Detected(Detection),
    NoFace(SoftFailure),
}

/// Store failures. Unlike soft failures these are surfaced to the caller as
/// hard errors, never folded into the "no face" response.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Detection pipeline:
/// decode → locate face → synthesize landmarks → classify → persist → query
/// catalog.
///
/// Exactly one history write happens per face-found request; the soft path
/// writes nothing. The catalog is read-only.
pub struct DetectEmotionUseCase {
    decoder: Box<dyn SnapshotDecoder>,
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn EmotionClassifier>,
    history: Box<dyn DetectionHistory>,
    catalog: Box<dyn SongCatalog>,
}

impl DetectEmotionUseCase {
    pub fn new(
        decoder: Box<dyn SnapshotDecoder>,
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn EmotionClassifier>,
        history: Box<dyn DetectionHistory>,
        catalog: Box<dyn SongCatalog>,
    ) -> Self {
        Self {
            decoder,
            detector,
            classifier,
            history,
            catalog,
        }
    }

    pub fn execute(
        &mut self,
        user: &UserIdentity,
        snapshot: &str,
    ) -> Result<DetectionOutcome, PipelineError> {
        let frame = match self.decoder.decode(snapshot) {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("snapshot decode failed: {e}");
                return Ok(DetectionOutcome::NoFace(SoftFailure::DecodeFailed));
            }
        };

        let faces = match self.detector.detect(&frame) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("face detection failed: {e}");
                return Ok(DetectionOutcome::NoFace(SoftFailure::NoFaceFound));
            }
        };
        let Some(face) = FaceRegion::largest(&faces) else {
            log::info!("no face found for {}", user.email);
            return Ok(DetectionOutcome::NoFace(SoftFailure::NoFaceFound));
        };

        let landmarks = landmark_overlay::synthesize(&face);

        let scores = match self.classifier.analyze(&frame, Some(&face)) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("emotion classification failed: {e}");
                return Ok(DetectionOutcome::NoFace(SoftFailure::ClassifierFailed));
            }
        };

        let emotion = scores.dominant();
        log::info!(
            "{} - detected {} ({:.1}%)",
            user.email,
            emotion.label(),
            scores.confidence()
        );

        self.history.record(&NewDetection {
            user_id: user.user_id,
            email: &user.email,
            emotion,
            confidence: scores.confidence(),
        })?;

        let songs = self.catalog.find_by_emotion(emotion, CATALOG_LIMIT)?;

        Ok(DetectionOutcome::Detected(Detection {
            emotion,
            scores,
            face,
            landmarks,
            songs,
        }))
    }
}
