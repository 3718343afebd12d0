//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, auth_guard_hx},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_edit_category_page, get_new_category_page, update_category_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    forgot_password::{get_forgot_password_page, post_forgot_password},
    import::{MAX_IMPORT_BYTES, get_import_page, import_statement},
    internal_server_error::get_internal_server_error_page,
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    not_found::get_404_not_found,
    register_user::{get_register_page, register_user},
    subscription::{create_payment_link_endpoint, get_subscribe_page},
    transaction::{get_edit_transaction_page, get_transactions_page, update_transaction_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(
            endpoints::FORGOT_PASSWORD_VIEW,
            get(get_forgot_password_page),
        )
        .route(endpoints::FORGOT_PASSWORD_API, post(post_forgot_password))
        .route(endpoints::USERS, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(endpoints::IMPORT_VIEW, get(get_import_page))
        .route(endpoints::SUBSCRIBE_VIEW, get(get_subscribe_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PUT/DELETE routes need to use the HX-Redirect header for
    // auth redirects to work properly for htmx requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::POST_CATEGORY,
                post(create_category_endpoint),
            )
            .route(
                endpoints::PUT_CATEGORY,
                put(update_category_endpoint).delete(delete_category_endpoint),
            )
            .route(
                endpoints::PUT_TRANSACTION,
                put(update_transaction_endpoint),
            )
            .route(
                endpoints::IMPORT,
                // The handler rejects anything over the 5 MB statement
                // limit itself; the body limit just has to let an
                // oversized upload through far enough to get the
                // friendly alert instead of a bare 413.
                post(import_statement).layer(DefaultBodyLimit::max(4 * MAX_IMPORT_BYTES)),
            )
            .route(endpoints::PAYMENT_LINK, post(create_payment_link_endpoint))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;

    use crate::{AppState, api::ApiClient, build_router, endpoints};

    fn get_test_server() -> TestServer {
        let state = AppState::new("foobar", ApiClient::new("http://127.0.0.1:1"));
        let app = build_router(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn protected_page_without_session_redirects_to_log_in() {
        let server = get_test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_see_other();
        let expected_query =
            serde_urlencoded::to_string([("redirect_url", endpoints::DASHBOARD_VIEW)]).unwrap();
        assert_eq!(
            response.header("location"),
            format!("{}?{}", endpoints::LOG_IN_VIEW, expected_query)
        );
    }

    #[tokio::test]
    async fn protected_api_route_without_session_uses_hx_redirect() {
        let server = get_test_server();
        let current_url = "/categories/new";

        let response = server
            .post(endpoints::POST_CATEGORY)
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", current_url)
            .await;

        response.assert_status_ok();
        let expected_query = serde_urlencoded::to_string([("redirect_url", current_url)]).unwrap();
        assert_eq!(
            response.header("hx-redirect"),
            format!("{}?{}", endpoints::LOG_IN_VIEW, expected_query)
        );
    }

    #[tokio::test]
    async fn log_in_page_is_reachable_without_a_session() {
        let server = get_test_server();

        let response = server.get(endpoints::LOG_IN_VIEW).await;

        response.assert_status_ok();
        response.assert_text_contains("Log in");
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found_page() {
        let server = get_test_server();

        let response = server.get("/no/such/page").await;

        response.assert_status_not_found();
        response.assert_text_contains("404");
    }
}
