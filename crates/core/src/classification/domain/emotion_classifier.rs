use thiserror::Error;

use crate::classification::domain::emotion::Emotion;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("emotion model failed: {0}")]
    Inference(String),
}

/// Per-label scores as percentages.
///
/// Scores are non-negative and sum to roughly 100; the dominant label is
/// the argmax, with ties resolved toward the earlier label in
/// [`Emotion::ALL`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct EmotionScores {
    scores: [f32; 7],
}

impl EmotionScores {
    pub fn new(scores: [f32; 7]) -> Self {
        debug_assert!(scores.iter().all(|s| *s >= 0.0), "scores must be non-negative");
        Self { scores }
    }

    pub fn get(&self, emotion: Emotion) -> f32 {
        self.scores[emotion.index()]
    }

    pub fn dominant(&self) -> Emotion {
        Emotion::ALL
            .into_iter()
            .reduce(|best, e| if self.get(e) > self.get(best) { e } else { best })
            .expect("vocabulary is non-empty")
    }

    /// The dominant label's score, i.e. the distribution maximum.
    pub fn confidence(&self) -> f32 {
        self.get(self.dominant())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }
}

/// Black-box facial-emotion capability.
///
/// Any conforming implementation (local model, remote inference service)
/// can be substituted behind this seam without touching the orchestrator.
pub trait EmotionClassifier: Send {
    /// Analyzes the frame. When a face region is supplied the implementation
    /// may restrict analysis to it, but it must not reject the input for
    /// lack of a confidently detected face.
    fn analyze(
        &mut self,
        frame: &Frame,
        face: Option<&FaceRegion>,
    ) -> Result<EmotionScores, ClassifierError>;
}
