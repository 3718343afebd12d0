//! Zentavo is the web client for the Zentavo personal-finance service.
//!
//! This library serves HTML pages for dashboards, transactions, categories
//! and statement imports. It holds no data of its own: every read and write
//! is delegated to the Zentavo backend API over HTTP, and the only state
//! kept client-side is the signed cookie carrying the backend's access
//! token.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod endpoints;
mod forgot_password;
mod html;
mod import;
mod internal_server_error;
mod log_in;
mod log_out;
mod logging;
mod navigation;
mod not_found;
mod period;
mod register_user;
mod routing;
mod shared_templates;
mod subscription;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api::ApiClient;
pub use app_state::AppState;
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{
    alert::Alert,
    auth::SessionExpiredRedirect,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
    not_found::get_404_not_found_response,
    shared_templates::render,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    /// The backend answered 401: the stored access token is missing,
    /// invalid or expired. The client must be sent back to the log-in page
    /// and the token cookie cleared.
    #[error("the session has expired")]
    SessionExpired,

    /// The backend answered 403: the feature needs an active subscription.
    #[error("an active subscription is required for this feature")]
    SubscriptionRequired,

    /// The backend answered 400 and (possibly) explained why.
    ///
    /// The message is safe to show to the user; it either comes from the
    /// backend's error body or is a generic fallback.
    #[error("{0}")]
    BackendRejected(String),

    /// The backend answered with a status this client does not handle.
    #[error("the server returned an unexpected status code {0}")]
    UnexpectedResponse(u16),

    /// The backend could not be reached (DNS, connect, timeout, or the
    /// connection dropped mid-request).
    #[error("could not connect to the server")]
    ConnectionFailed,

    /// The log-in endpoint rejected the email/password combination.
    ///
    /// Kept separate from [Error::SessionExpired] so a failed log-in
    /// renders an inline form error instead of redirecting to itself.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// The access token stored in the cookie could not be decoded as a JWT.
    #[error("the access token could not be decoded")]
    InvalidToken,

    /// The requested resource was not found on the backend.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource exists.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An empty string was submitted for a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was submitted for a transaction description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The submitted category color is not a hex color like `#22c55e`.
    #[error("\"{0}\" is not a valid hex color")]
    InvalidColor(String),

    /// The uploaded file does not have an importable extension.
    #[error("\"{0}\" is not an OFX or CSV statement")]
    UnsupportedFileType(String),

    /// The uploaded file exceeds the import size limit.
    #[error("the file exceeds the 5 MB import limit")]
    FileTooLarge,

    /// The multipart form could not be parsed as an uploaded statement.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // The auth middleware replaces this marker response with a
            // redirect to the log-in page and clears the token cookie.
            Error::SessionExpired => {
                let mut response = StatusCode::UNAUTHORIZED.into_response();
                response.extensions_mut().insert(SessionExpiredRedirect);
                response
            }
            Error::SubscriptionRequired => {
                Redirect::to(endpoints::SUBSCRIBE_VIEW).into_response()
            }
            Error::NotFound => get_404_not_found_response(),
            Error::ConnectionFailed => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "Could not reach the server",
                    fix: "Check your connection and refresh the page to try again.",
                })
            }
            Error::BackendRejected(ref message) => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "The server rejected the request",
                    fix: message,
                })
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    /// Map an error to an htmx-friendly response: an out-of-band alert
    /// fragment, or an HX-Redirect for errors that must change pages.
    fn into_alert_response(self) -> Response {
        match self {
            Error::SessionExpired => {
                let mut response = StatusCode::UNAUTHORIZED.into_response();
                response.extensions_mut().insert(SessionExpiredRedirect);
                response
            }
            Error::SubscriptionRequired => (
                HxRedirect(endpoints::SUBSCRIBE_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response(),
            Error::BackendRejected(message) => render(
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple { message }.into_html(),
            ),
            Error::ConnectionFailed => render(
                StatusCode::SERVICE_UNAVAILABLE,
                Alert::Error {
                    message: "Connection error".to_owned(),
                    details: "Could not reach the server. Check your connection and try again."
                        .to_owned(),
                }
                .into_html(),
            ),
            Error::NotFound => render(
                StatusCode::NOT_FOUND,
                Alert::ErrorSimple {
                    message: "The requested item could not be found. \
                        Try refreshing the page."
                        .to_owned(),
                }
                .into_html(),
            ),
            error @ (Error::EmptyCategoryName
            | Error::EmptyDescription
            | Error::InvalidColor(_)
            | Error::UnsupportedFileType(_)
            | Error::FileTooLarge) => render(
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: error.to_string(),
                }
                .into_html(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    }
                    .into_html(),
                )
            }
        }
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, auth::SessionExpiredRedirect, endpoints};

    #[test]
    fn session_expired_carries_redirect_marker() {
        let response = Error::SessionExpired.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(
            response
                .extensions()
                .get::<SessionExpiredRedirect>()
                .is_some(),
            "session expiry response should carry the redirect marker for the auth middleware"
        );
    }

    #[test]
    fn subscription_required_redirects_to_subscribe_page() {
        let response = Error::SubscriptionRequired.into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::SUBSCRIBE_VIEW
        );
    }

    #[test]
    fn backend_rejection_message_appears_in_alert() {
        let response =
            Error::BackendRejected("The statement file is malformed".to_owned())
                .into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
