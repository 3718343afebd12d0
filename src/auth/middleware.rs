//! Authentication middleware that validates the token cookie and handles redirects.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    auth::{
        cookie::get_token_from_cookies,
        invalidate_auth_cookie,
        redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    },
    endpoints,
};

/// A marker placed on responses by [crate::Error::SessionExpired].
///
/// The guard replaces any marked response with a redirect to the log-in
/// page and clears the token cookie, so a backend 401 from any data fetch
/// ends the session uniformly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionExpiredRedirect;

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that checks for a valid token cookie.
///
/// On success the access token and its decoded claims are placed into the
/// request extensions and the request runs normally, otherwise a redirect
/// to the log-in page is returned using `get_redirect`.
///
/// **Note**: Route handlers can use `Extension(token): Extension<AccessToken>`
/// and `Extension(claims): Extension<Claims>` to receive the session data.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let log_in_redirect_url = build_log_in_redirect_url(&request).unwrap_or_else(|| {
        tracing::warn!("Invalid redirect URL from request URI. Falling back to dashboard.");

        build_log_in_redirect_url_from_target(endpoints::DASHBOARD_VIEW)
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
    });

    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Redirecting to log in page.");
            return get_redirect(&log_in_redirect_url);
        }
    };

    let token = match get_token_from_cookies(&jar) {
        Ok(token) => token,
        Err(_) => return get_redirect(&log_in_redirect_url),
    };

    // An unreadable or expired token means the session is over; there is
    // no point forwarding the request just to get a 401 from the backend.
    let claims = match token.claims() {
        Ok(claims) => claims,
        Err(_) => {
            return expire_session(jar, get_redirect(&log_in_redirect_url));
        }
    };

    parts.extensions.insert(token);
    parts.extensions.insert(claims);
    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    if response
        .extensions()
        .get::<SessionExpiredRedirect>()
        .is_some()
    {
        return expire_session(jar, get_redirect(&log_in_redirect_url));
    }

    response
}

/// Attach the cookie-clearing headers to a log-in redirect.
fn expire_session(jar: PrivateCookieJar, redirect: Response) -> Response {
    let (mut parts, body) = redirect.into_parts();

    let jar = invalidate_auth_cookie(jar);
    for (key, value) in jar.into_response().headers().iter() {
        if key != SET_COOKIE {
            continue;
        }

        parts.headers.append(key, value.to_owned());
    }

    Response::from_parts(parts, body)
}

/// Middleware function that checks for a valid token cookie on page routes.
///
/// Requests without a live session are redirected to the log-in page with
/// a `redirect_url` back to the requested page.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Middleware function that checks for a valid token cookie on htmx routes.
///
/// Same behavior as [auth_guard] but redirects with the HX-Redirect header
/// so htmx performs a full page navigation.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
