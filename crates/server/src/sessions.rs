use std::collections::HashMap;
use std::sync::RwLock;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use rand::Rng;

pub const SESSION_COOKIE: &str = "moodsync_session";

/// The identity a session token resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub is_admin: bool,
}

/// In-memory session registry keyed by opaque random tokens.
///
/// Tokens are 32 random bytes, hex-encoded. Sessions live until logout or
/// process restart; there is no expiry, matching the cookie-session model
/// this replaces.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, SessionUser>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session and returns its token.
    pub fn insert(&self, user: SessionUser) -> String {
        let token = hex::encode(rand::thread_rng().gen::<[u8; 32]>());
        self.inner
            .write()
            .expect("session lock poisoned")
            .insert(token.clone(), user);
        token
    }

    pub fn get(&self, token: &str) -> Option<SessionUser> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .get(token)
            .cloned()
    }

    pub fn remove(&self, token: &str) {
        self.inner
            .write()
            .expect("session lock poisoned")
            .remove(token);
    }
}

/// Extracts the session token from a request's Cookie header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Resolves the request's session user, if any.
pub fn session_from_headers(store: &SessionStore, headers: &HeaderMap) -> Option<SessionUser> {
    store.get(&token_from_headers(headers)?)
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
