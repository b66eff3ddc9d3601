use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use moodsync_core::auth::domain::user_store::{NewUser, User, UserStoreError};

use crate::sessions::{
    clear_session_cookie, session_cookie, session_from_headers, token_from_headers, SessionUser,
};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Response {
    let first_name = request.first_name.trim().to_string();
    let last_name = request.last_name.trim().to_string();
    let email = request.email.trim().to_lowercase();

    if first_name.is_empty() || last_name.is_empty() || email.is_empty() || request.password.is_empty()
    {
        return bad_request("All fields are required");
    }
    if request.password.len() < 8 {
        return bad_request("Password must be at least 8 characters");
    }
    if !email.contains('@') {
        return bad_request("Invalid email address");
    }

    let created = tokio::task::spawn_blocking({
        let state = state.clone();
        let password = request.password.clone();
        move || {
            state.users.create(&NewUser {
                first_name: &first_name,
                last_name: &last_name,
                email: &email,
                password: &password,
            })
        }
    })
    .await;

    match created {
        Ok(Ok(user)) => {
            log::info!("new user registered: {}", user.email);
            let (cookie, payload) = establish_session(&state, &user);
            (
                StatusCode::CREATED,
                [(SET_COOKIE, cookie)],
                Json(json!({
                    "success": true,
                    "message": "Account created successfully",
                    "user": payload,
                })),
            )
                .into_response()
        }
        Ok(Err(UserStoreError::EmailTaken)) => bad_request("Email already registered"),
        Ok(Err(e)) => store_error(e),
        Err(join_error) => {
            log::error!("signup task failed: {join_error}");
            store_error(UserStoreError::Store("signup failed".into()))
        }
    }
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return bad_request("Email and password are required");
    }

    let authenticated = tokio::task::spawn_blocking({
        let state = state.clone();
        let password = request.password.clone();
        move || state.users.authenticate(&email, &password)
    })
    .await;

    match authenticated {
        Ok(Ok(user)) => {
            log::info!("user logged in: {}", user.email);
            let (cookie, payload) = establish_session(&state, &user);
            (
                StatusCode::OK,
                [(SET_COOKIE, cookie)],
                Json(json!({ "success": true, "user": payload })),
            )
                .into_response()
        }
        Ok(Err(UserStoreError::InvalidCredentials)) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password" })),
        )
            .into_response(),
        Ok(Err(e)) => store_error(e),
        Err(join_error) => {
            log::error!("login task failed: {join_error}");
            store_error(UserStoreError::Store("login failed".into()))
        }
    }
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.remove(&token);
    }
    (
        StatusCode::OK,
        [(SET_COOKIE, clear_session_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// GET /api/auth/me
pub async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match session_from_headers(&state.sessions, &headers) {
        Some(session) => (
            StatusCode::OK,
            Json(json!({
                "user": {
                    "id": session.user_id,
                    "firstName": session.first_name,
                    "email": session.email,
                    "isAdmin": session.is_admin,
                }
            })),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Login required" })),
        )
            .into_response(),
    }
}

fn establish_session(state: &AppState, user: &User) -> (String, Value) {
    let token = state.sessions.insert(SessionUser {
        user_id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        is_admin: user.is_admin,
    });
    let payload = json!({
        "id": user.id,
        "firstName": user.first_name,
        "lastName": user.last_name,
        "email": user.email,
        "isAdmin": user.is_admin,
    });
    (session_cookie(&token), payload)
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn store_error(error: UserStoreError) -> Response {
    log::error!("user store failure: {error}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}
