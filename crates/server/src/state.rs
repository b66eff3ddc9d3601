use std::sync::Mutex;
use std::time::Duration;

use moodsync_core::auth::domain::user_store::UserStore;
use moodsync_core::history::domain::detection_history::DetectionHistory;
use moodsync_core::pipeline::detect_emotion_use_case::DetectEmotionUseCase;

use crate::sessions::SessionStore;

/// Shared application state.
///
/// The pipeline owns mutable inference sessions, so it sits behind a mutex;
/// detections therefore serialize, which also keeps the CPU-bound inference
/// from oversubscribing the blocking pool.
pub struct AppState {
    pub pipeline: Mutex<DetectEmotionUseCase>,
    pub users: Box<dyn UserStore>,
    pub history: Box<dyn DetectionHistory>,
    pub sessions: SessionStore,
    pub detect_budget: Duration,
}
