//! The URIs served by this client and the backend API paths it consumes.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}/edit',
//! use [format_endpoint].

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying a month of transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page for listing all categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/categories/{category_id}/edit";
/// The page for uploading bank statements.
pub const IMPORT_VIEW: &str = "/import";
/// The page offering an upgrade when the subscription gate is closed.
pub const SUBSCRIBE_VIEW: &str = "/subscribe";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The route for instructions for resetting the user's password.
pub const FORGOT_PASSWORD_VIEW: &str = "/forgot_password";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for registering a new user.
pub const USERS: &str = "/api/users";
/// The route for requesting password reset instructions.
pub const FORGOT_PASSWORD_API: &str = "/api/forgot_password";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to update a category.
pub const PUT_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to update a transaction.
pub const PUT_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to upload statement files for importing transactions.
pub const IMPORT: &str = "/api/import";
/// The route to request a payment link for upgrading the subscription.
pub const PAYMENT_LINK: &str = "/api/payments/link";

/// The paths of the Zentavo backend API.
///
/// These contracts are owned by the backend; this module only mirrors the
/// paths so the HTTP client and the stub backend used in tests agree on
/// them. Parametrised paths use axum-style placeholders.
pub mod backend {
    /// Exchange an email/password pair for an access token.
    pub const LOG_IN: &str = "/api/auth/login";
    /// Request password reset instructions by email.
    pub const FORGOT_PASSWORD: &str = "/api/auth/forgot-password";
    /// Create a new user account.
    pub const CREATE_USER: &str = "/api/users/create";
    /// Get the user that owns the access token.
    pub const ME: &str = "/api/users/me";
    /// List (GET) or create (POST) categories.
    pub const CATEGORIES: &str = "/api/categories";
    /// Update (PUT) or delete (DELETE) a single category.
    pub const CATEGORY: &str = "/api/categories/{id}";
    /// Get the transactions for a month.
    pub const TRANSACTIONS: &str = "/api/transactions/{month}/{year}";
    /// Update a single transaction.
    pub const TRANSACTION: &str = "/api/transactions/{id}";
    /// Upload a bank statement for parsing and import.
    pub const IMPORT: &str = "/api/transactions/import";
    /// Totals per payment method for a month.
    pub const PAYMENT_METHOD_SUMMARY: &str =
        "/api/transactions/dashboard/payment-methods/{month}/{year}";
    /// Totals per category for a month and transaction type.
    pub const CATEGORY_SUMMARY: &str =
        "/api/transactions/dashboard/categories/{month}/{year}/{transaction_type}";
    /// Income/expense totals for the last six months.
    pub const LAST_SIX_MONTHS: &str = "/api/transactions/dashboard/last-six-months";
    /// Create a payment link for upgrading the subscription.
    pub const PAYMENT_LINK: &str = "/api/payments/link";
}

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}/edit',
/// '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints::{self, backend};

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_CATEGORY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_CATEGORY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::IMPORT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SUBSCRIBE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::REGISTER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::FORGOT_PASSWORD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::LOG_IN_API);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::USERS);
        assert_endpoint_is_valid_uri(endpoints::FORGOT_PASSWORD_API);
        assert_endpoint_is_valid_uri(endpoints::POST_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::PUT_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::DELETE_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::PUT_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::IMPORT);
        assert_endpoint_is_valid_uri(endpoints::PAYMENT_LINK);
    }

    #[test]
    fn backend_paths_are_valid_uris() {
        assert_endpoint_is_valid_uri(backend::LOG_IN);
        assert_endpoint_is_valid_uri(backend::FORGOT_PASSWORD);
        assert_endpoint_is_valid_uri(backend::CREATE_USER);
        assert_endpoint_is_valid_uri(backend::ME);
        assert_endpoint_is_valid_uri(backend::CATEGORIES);
        assert_endpoint_is_valid_uri(backend::CATEGORY);
        assert_endpoint_is_valid_uri(backend::TRANSACTIONS);
        assert_endpoint_is_valid_uri(backend::TRANSACTION);
        assert_endpoint_is_valid_uri(backend::IMPORT);
        assert_endpoint_is_valid_uri(backend::PAYMENT_METHOD_SUMMARY);
        assert_endpoint_is_valid_uri(backend::CATEGORY_SUMMARY);
        assert_endpoint_is_valid_uri(backend::LAST_SIX_MONTHS);
        assert_endpoint_is_valid_uri(backend::PAYMENT_LINK);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
