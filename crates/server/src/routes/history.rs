use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::sessions::session_from_headers;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct HistoryQuery {
    limit: Option<i64>,
}

/// GET /api/emotion/history — the session user's detections, newest first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let Some(session) = session_from_headers(&state.sessions, &headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Login required" })),
        )
            .into_response();
    };

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let records = tokio::task::spawn_blocking({
        let state = state.clone();
        move || state.history.recent(session.user_id, limit)
    })
    .await;

    match records {
        Ok(Ok(records)) => {
            let history: Vec<_> = records
                .iter()
                .map(|record| {
                    json!({
                        "emotion": record.emotion,
                        "confidence": record.confidence,
                        "detectedAt": record.detected_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "history": history }))).into_response()
        }
        Ok(Err(e)) => {
            log::error!("history read failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
        Err(join_error) => {
            log::error!("history task failed: {join_error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "history lookup failed" })),
            )
                .into_response()
        }
    }
}
