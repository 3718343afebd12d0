//! The 404 not found page.

use axum::{http::StatusCode, response::Response};
use maud::Markup;

use crate::{html::error_view, shared_templates::render};

fn not_found_view() -> Markup {
    error_view(
        "Page Not Found",
        "404",
        "Sorry, this page does not exist.",
        "Check the address for typos or head back to the dashboard.",
    )
}

/// Route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a 404 response with the not found page as its body.
pub fn get_404_not_found_response() -> Response {
    render(StatusCode::NOT_FOUND, not_found_view())
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::get_404_not_found;

    #[tokio::test]
    async fn renders_not_found_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }
}
