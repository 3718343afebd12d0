//! Helpers for building the log-in redirect with a return URL.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

/// Validate a redirect URL taken from a query string or form field.
///
/// Only site-relative paths are accepted so a crafted link cannot bounce
/// a user to another origin after logging in.
pub(crate) fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    if raw_url.starts_with('/') && !raw_url.starts_with("//") {
        Some(raw_url.to_owned())
    } else {
        None
    }
}

/// Build the log-in page URL with `target` as the `redirect_url` query
/// parameter.
pub(crate) fn build_log_in_redirect_url_from_target(target: &str) -> Option<String> {
    let query = serde_urlencoded::to_string([("redirect_url", target)])
        .inspect_err(|error| {
            tracing::error!("Could not encode redirect URL {target}: {error}");
        })
        .ok()?;

    Some(format!("{}?{}", endpoints::LOG_IN_VIEW, query))
}

/// Build the log-in page URL that returns the user to the page they were
/// on when their session lapsed.
///
/// For htmx requests the page shown in the browser is the `HX-Current-URL`
/// header, not the request URI, so that takes precedence.
pub(crate) fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let target = match request.headers().get("HX-Current-URL") {
        Some(current_url) => current_url.to_str().ok().and_then(path_and_query)?,
        None => request.uri().to_string(),
    };

    let target = normalize_redirect_url(&target)?;

    build_log_in_redirect_url_from_target(&target)
}

/// Reduce a URL (absolute or site-relative) to its path and query.
fn path_and_query(url: &str) -> Option<String> {
    if url.starts_with('/') {
        return Some(url.to_owned());
    }

    url.parse::<Uri>()
        .ok()?
        .path_and_query()
        .map(|path_and_query| path_and_query.to_string())
}
