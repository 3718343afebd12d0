//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};

/// The form fields that carry secrets and must never reach the logs.
///
/// The log-in and forgot-password forms submit `password`; the
/// registration form submits `password` and `confirm_password`. Everything
/// else this client's forms send (category names, descriptions, months) is
/// safe to log.
const SECRET_FORM_FIELDS: [&str; 2] = ["password", "confirm_password"];

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level. The [SECRET_FORM_FIELDS]
/// submitted through forms are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body_text) = extract_header_and_body_text_from_request(request).await;

    if headers.method.eq(&axum::http::Method::POST)
        && headers.headers.get(CONTENT_TYPE)
            == Some(&"application/x-www-form-urlencoded".parse().unwrap())
    {
        let display_text = redact_secret_fields(&body_text);
        log_request(&headers, &display_text);
    } else {
        log_request(&headers, &body_text);
    }

    let request = Request::from_parts(headers, body_text.into());
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

/// Redact every field in [SECRET_FORM_FIELDS] from a form body.
fn redact_secret_fields(form_text: &str) -> String {
    SECRET_FORM_FIELDS
        .iter()
        .fold(form_text.to_owned(), |form_text, field_name| {
            redact_field(&form_text, field_name)
        })
}

fn redact_field(form_text: &str, field_name: &str) -> String {
    let field_start = form_text.find(&format!("{}=", field_name));

    let start = match field_start {
        Some(field_pos) => field_pos,
        None => return form_text.to_string(),
    };

    let field_end = form_text[start..].find('&');
    let end = match field_end {
        Some(end) => start + end,
        None => form_text.len(),
    };
    let field = &form_text[start..end];

    form_text.replace(field, &format!("{}=********", field_name))
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

const LOG_BODY_LENGTH_LIMIT: usize = 64;

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod redaction_tests {
    use super::{redact_field, redact_secret_fields};

    #[test]
    fn redacts_field_in_the_middle_of_the_form() {
        let redacted = redact_field("email=a%40b.com&password=hunter2&remember_me=on", "password");

        assert_eq!(redacted, "email=a%40b.com&password=********&remember_me=on");
    }

    #[test]
    fn redacts_trailing_field() {
        let redacted = redact_field("email=a%40b.com&password=hunter2", "password");

        assert_eq!(redacted, "email=a%40b.com&password=********");
    }

    #[test]
    fn redacts_log_in_submission() {
        let redacted = redact_secret_fields("email=a%40b.com&password=hunter2");

        assert_eq!(redacted, "email=a%40b.com&password=********");
    }

    #[test]
    fn redacts_both_password_fields_of_a_registration() {
        // The mismatch case matters most: the two values differ, so each
        // must be found and redacted independently.
        let redacted = redact_secret_fields(
            "name=Alice&email=a%40b.com&password=hunter2&confirm_password=hunter3",
        );

        assert_eq!(
            redacted,
            "name=Alice&email=a%40b.com&password=********&confirm_password=********"
        );
    }

    #[test]
    fn leaves_forms_without_secret_fields_untouched() {
        let redacted = redact_secret_fields("name=Groceries&color=%2322c55e");

        assert_eq!(redacted, "name=Groceries&color=%2322c55e");
    }
}
