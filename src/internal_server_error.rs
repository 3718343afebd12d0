//! The 500 internal server error page.

use axum::{http::StatusCode, response::Response};

use crate::{html::error_view, shared_templates::render};

/// The text shown on the internal server error page.
pub struct InternalServerErrorPageTemplate<'a> {
    /// What went wrong.
    pub description: &'a str,
    /// What the user can do about it.
    pub fix: &'a str,
}

impl Default for InternalServerErrorPageTemplate<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

/// Route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(Default::default())
}

/// Get a 500 response with an error page describing the problem.
pub fn render_internal_server_error(template: InternalServerErrorPageTemplate) -> Response {
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Error", "500", template.description, template.fix),
    )
}

#[cfg(test)]
mod internal_server_error_tests {
    use axum::http::StatusCode;

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::{InternalServerErrorPageTemplate, render_internal_server_error};

    #[tokio::test]
    async fn renders_description_and_fix() {
        let response = render_internal_server_error(InternalServerErrorPageTemplate {
            description: "Could not reach the server",
            fix: "Check your connection and refresh the page to try again.",
        });

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Could not reach the server"));
        assert!(text.contains("refresh the page"));
    }
}
