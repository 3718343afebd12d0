//! The registration page and endpoint.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::ApiClient,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, email_input,
        loading_spinner, log_in_register, password_input,
    },
};

/// The minimum password length the backend accepts.
const MIN_PASSWORD_LENGTH: u8 = 8;

fn register_form(name: &str, email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#name, #email, #password, #confirm_password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="Your name"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(name);
            }

            (email_input(email, None))

            (password_input(MIN_PASSWORD_LENGTH, None))

            div
            {
                label for="confirm_password" class=(FORM_LABEL_STYLE) { "Confirm password" }

                input
                    type="password"
                    name="confirm_password"
                    id="confirm_password"
                    placeholder="••••••••"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    minlength=(MIN_PASSWORD_LENGTH);

                @if let Some(error_message) = error_message
                {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            button
                type="submit" id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Create account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "
                a
                    href=(endpoints::LOG_IN_VIEW)
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let form = register_form("", "", None);
    let content = log_in_register("Create your account", &form);
    base("Register", &[], &content).into_response()
}

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegisterState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The raw data entered by the user in the registration form.
#[derive(Clone, Deserialize)]
pub struct RegisterData {
    /// The display name for the new account.
    pub name: String,
    /// Email entered during registration.
    pub email: String,
    /// Password entered during registration.
    pub password: String,
    /// The password again, to catch typos before the backend does.
    pub confirm_password: String,
}

/// Handler for registration requests via the POST method.
///
/// The only check done here is that the two password fields match; the
/// backend owns all other validation. On success the client is redirected
/// to the log-in page.
pub async fn register_user(
    State(state): State<RegisterState>,
    Form(user_data): Form<RegisterData>,
) -> Response {
    if user_data.password != user_data.confirm_password {
        return register_form(
            &user_data.name,
            &user_data.email,
            Some("Passwords do not match."),
        )
        .into_response();
    }

    match state
        .api
        .create_user(&user_data.name, &user_data.email, &user_data.password)
        .await
    {
        Ok(()) => (
            HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::BackendRejected(message)) => {
            register_form(&user_data.name, &user_data.email, Some(&message)).into_response()
        }
        Err(Error::ConnectionFailed) => register_form(
            &user_data.name,
            &user_data.email,
            Some("Could not reach the server. Check your connection and try again."),
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Unhandled error while registering: {error}");
            register_form(
                &user_data.name,
                &user_data.email,
                Some("An internal error occurred. Please try again later."),
            )
            .into_response()
        }
    }
}

#[cfg(test)]
mod register_page_tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::get_register_page;

    #[tokio::test]
    async fn render_page() {
        let response = get_register_page().await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::USERS, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "email", "email");
        assert_form_input(&form, "password", "password");
        assert_form_input(&form, "confirm_password", "password");
        assert_form_submit_button(&form);
    }
}

#[cfg(test)]
mod register_user_tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Form, Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::json;

    use crate::{
        ApiClient,
        endpoints::{self, backend},
        test_utils::{
            assert_form_error_message, assert_hx_redirect, must_get_form, parse_html_fragment,
            spawn_backend,
        },
    };

    use super::{RegisterData, RegisterState, register_user};

    fn register_data(password: &str, confirm_password: &str) -> RegisterData {
        RegisterData {
            name: "Alice Example".to_owned(),
            email: "alice@example.com".to_owned(),
            password: password.to_owned(),
            confirm_password: confirm_password.to_owned(),
        }
    }

    #[tokio::test]
    async fn register_redirects_to_log_in_on_success() {
        let router = Router::new().route(
            backend::CREATE_USER,
            post(|| async { StatusCode::CREATED }),
        );
        let base_url = spawn_backend(router).await;
        let state = RegisterState {
            api: ApiClient::new(&base_url),
        };

        let response = register_user(State(state), Form(register_data("hunter22", "hunter22"))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn mismatched_passwords_issue_no_backend_call() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let counter = call_count.clone();
        let router = Router::new().route(
            backend::CREATE_USER,
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::CREATED
                }
            }),
        );
        let base_url = spawn_backend(router).await;
        let state = RegisterState {
            api: ApiClient::new(&base_url),
        };

        let response = register_user(State(state), Form(register_data("hunter22", "hunter23"))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            call_count.load(Ordering::SeqCst),
            0,
            "no request should reach the backend when the passwords do not match"
        );

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Passwords do not match.");
    }

    #[tokio::test]
    async fn backend_rejection_shows_inline_error() {
        let router = Router::new().route(
            backend::CREATE_USER,
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "Email is already registered"})),
                )
            }),
        );
        let base_url = spawn_backend(router).await;
        let state = RegisterState {
            api: ApiClient::new(&base_url),
        };

        let response = register_user(State(state), Form(register_data("hunter22", "hunter22"))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Email is already registered");
    }
}
