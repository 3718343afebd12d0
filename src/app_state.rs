//! Implements a struct that holds the state of the web client.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{api::ApiClient, auth::DEFAULT_COOKIE_DURATION};

/// The state shared by all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl AppState {
    /// Create a new [AppState] for the backend reachable through `api`.
    ///
    /// `cookie_secret` seeds the key that signs and encrypts the auth
    /// cookie. It must stay stable across restarts, otherwise every
    /// session is invalidated on deploy.
    pub fn new(cookie_secret: &str, api: ApiClient) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            api,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
