//! Shared helpers for turning maud markup into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

/// Render `markup` as an HTML response with the given status code.
pub fn render(status: StatusCode, markup: Markup) -> Response {
    (status, markup).into_response()
}
