use thiserror::Error;

use crate::classification::domain::emotion::Emotion;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("history store failed: {0}")]
    Store(String),
}

/// One detection about to be persisted.
///
/// `emotion` is typed, so a record's label is always a member of the fixed
/// vocabulary; `confidence` is the distribution maximum at detection time.
#[derive(Clone, Copy, Debug)]
pub struct NewDetection<'a> {
    pub user_id: i32,
    pub email: &'a str,
    pub emotion: Emotion,
    pub confidence: f32,
}

/// A persisted detection, as read back for history listings.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionRecord {
    pub emotion: String,
    pub confidence: f32,
    pub detected_at: chrono::NaiveDateTime,
}

/// Store boundary for the detection history.
///
/// Records are immutable: this pipeline only ever appends and reads.
pub trait DetectionHistory: Send + Sync {
    fn record(&self, detection: &NewDetection) -> Result<(), HistoryError>;

    /// Most recent detections for one user, newest first.
    fn recent(&self, user_id: i32, limit: i64) -> Result<Vec<DetectionRecord>, HistoryError>;
}
