//! Session handling for the backend-issued access token.
//!
//! The backend authenticates users and signs a JWT; this module stores
//! that token in a private cookie, decodes its claims locally (the
//! subscription flag, expiry and profile data) and guards the routes that
//! need a session. Verifying the token's signature is the backend's job,
//! not ours.

mod claims;
mod cookie;
mod middleware;
mod redirect;

pub use claims::{AccessToken, Claims};
pub(crate) use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub(crate) use middleware::SessionExpiredRedirect;
pub use middleware::{auth_guard, auth_guard_hx};
pub(crate) use redirect::{build_log_in_redirect_url_from_target, normalize_redirect_url};

#[cfg(test)]
pub(crate) use claims::{encode_test_token, test_claims};

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub(crate) use middleware::AuthState;
