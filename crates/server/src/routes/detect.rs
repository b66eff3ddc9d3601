use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use moodsync_core::pipeline::detect_emotion_use_case::{
    Detection, DetectionOutcome, UserIdentity,
};

use crate::sessions::session_from_headers;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DetectRequest {
    image: String,
}

/// POST /api/detect — the detection pipeline endpoint.
///
/// Soft failures (bad payload, no face, classifier trouble) all render the
/// same 200 fallback shape; store failures are a hard 500.
pub async fn detect_emotion(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<DetectRequest>,
) -> Response {
    let Some(session) = session_from_headers(&state.sessions, &headers) else {
        return login_required();
    };
    let identity = UserIdentity {
        user_id: session.user_id,
        email: session.email,
    };

    let worker_state = state.clone();
    let job = tokio::task::spawn_blocking(move || {
        let mut pipeline = match worker_state.pipeline.lock() {
            Ok(pipeline) => pipeline,
            Err(_) => return Err("detection pipeline is unavailable".to_string()),
        };
        pipeline
            .execute(&identity, &request.image)
            .map_err(|e| e.to_string())
    });

    let outcome = match tokio::time::timeout(state.detect_budget, job).await {
        Err(_) => {
            log::warn!("detection exceeded its {:?} budget", state.detect_budget);
            return no_face_response();
        }
        Ok(Err(join_error)) => {
            log::error!("detection task failed: {join_error}");
            return server_error("detection failed");
        }
        Ok(Ok(Err(store_error))) => {
            log::error!("store failure during detection: {store_error}");
            return server_error(&store_error);
        }
        Ok(Ok(Ok(outcome))) => outcome,
    };

    match outcome {
        DetectionOutcome::NoFace(_) => no_face_response(),
        DetectionOutcome::Detected(detection) => {
            (StatusCode::OK, Json(detection_payload(&detection))).into_response()
        }
    }
}

fn detection_payload(detection: &Detection) -> Value {
    let probabilities: serde_json::Map<String, Value> = detection
        .scores
        .iter()
        .map(|(emotion, score)| (emotion.label().to_string(), json!(score)))
        .collect();

    json!({
        "success": true,
        "emotion": detection.emotion.display_name(),
        "confidence": round2(detection.scores.confidence()),
        "probabilities": probabilities,
        "songs": detection.songs,
        "faceRegion": detection.face,
        "landmarks": detection.landmarks,
        "message": format!("🎭 Mood: {}!", detection.emotion.display_name()),
    })
}

fn no_face_response() -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": false,
            "message": "😕 No face detected",
            "showFallback": true,
        })),
    )
        .into_response()
}

fn server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

fn login_required() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Login required" })),
    )
        .into_response()
}

fn round2(value: f32) -> f64 {
    (value as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodsync_core::catalog::domain::song_catalog::Song;
    use moodsync_core::classification::domain::emotion::Emotion;
    use moodsync_core::classification::domain::emotion_classifier::EmotionScores;
    use moodsync_core::detection::domain::landmark_overlay;
    use moodsync_core::shared::region::FaceRegion;

    fn scenario_detection() -> Detection {
        // Vocabulary order: angry, disgust, fear, happy, sad, surprise, neutral.
        let scores = [0.5, 0.5, 0.5, 87.34, 0.5, 0.5, 0.5];
        let face = FaceRegion {
            x: 100,
            y: 80,
            width: 200,
            height: 220,
        };
        Detection {
            emotion: Emotion::Happy,
            scores: EmotionScores::new(scores),
            face,
            landmarks: landmark_overlay::synthesize(&face),
            songs: vec![Song {
                id: "64f0".into(),
                title: "Golden Hour".into(),
                artist: "JVKE".into(),
                cover_url: String::new(),
                audio_url: String::new(),
                emotions: vec!["happy".into()],
                language: "English".into(),
            }],
        }
    }

    #[test]
    fn test_detection_payload_matches_contract() {
        let payload = detection_payload(&scenario_detection());
        assert_eq!(payload["success"], true);
        assert_eq!(payload["emotion"], "Happy");
        assert_eq!(payload["confidence"], 87.34);
        assert_eq!(payload["message"], "🎭 Mood: Happy!");
        assert_eq!(
            payload["faceRegion"],
            json!({"x": 100, "y": 80, "w": 200, "h": 220})
        );
        assert_eq!(payload["landmarks"].as_array().unwrap().len(), 68);
        assert_eq!(payload["songs"][0]["_id"], "64f0");
    }

    #[test]
    fn test_probabilities_cover_all_seven_labels() {
        let payload = detection_payload(&scenario_detection());
        let probabilities = payload["probabilities"].as_object().unwrap();
        assert_eq!(probabilities.len(), 7);
        for label in ["angry", "disgust", "fear", "happy", "sad", "surprise", "neutral"] {
            assert!(
                probabilities[label].as_f64().unwrap() >= 0.0,
                "missing or negative {label}"
            );
        }
    }

    #[test]
    fn test_confidence_is_rounded_distribution_max() {
        let scores = [0.0, 0.0, 0.0, 0.0, 55.5555, 0.0, 0.0];
        let detection = Detection {
            scores: EmotionScores::new(scores),
            emotion: Emotion::Sad,
            ..scenario_detection()
        };
        let payload = detection_payload(&detection);
        assert_eq!(payload["confidence"], 55.56);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(87.34), 87.34);
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(100.0), 100.0);
    }
}
