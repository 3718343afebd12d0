//! The forgot password page and endpoint.

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::ApiClient,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, email_input, loading_spinner, log_in_register},
};

fn forgot_password_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::FORGOT_PASSWORD_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email, error_message))

            button
                type="submit" id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Send reset instructions"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Remembered it after all? "
                a
                    href=(endpoints::LOG_IN_VIEW)
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Back to log in"
                }
            }
        }
    }
}

fn confirmation_view() -> Markup {
    html! {
        p class="text-gray-900 dark:text-white"
        {
            "If that email belongs to an account, password reset
            instructions are on their way. Check your inbox."
        }
    }
}

/// Display the forgot password page.
pub async fn get_forgot_password_page() -> Response {
    let form = forgot_password_form("", None);
    let content = log_in_register("Reset your password", &form);
    base("Forgot Password", &[], &content).into_response()
}

/// The state needed to request a password reset.
#[derive(Debug, Clone)]
pub struct ForgotPasswordState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for ForgotPasswordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The raw data entered by the user in the forgot password form.
#[derive(Clone, Deserialize)]
pub struct ForgotPasswordData {
    /// The email to send reset instructions to.
    pub email: String,
}

/// Handler for password reset requests via the POST method.
///
/// The backend sends the email; the same confirmation is shown whether or
/// not the address exists, so the form cannot be used to probe accounts.
pub async fn post_forgot_password(
    State(state): State<ForgotPasswordState>,
    Form(form_data): Form<ForgotPasswordData>,
) -> Response {
    match state.api.forgot_password(&form_data.email).await {
        // The backend answers 400 for unknown emails; rendering the
        // confirmation for those too keeps the form from leaking which
        // accounts exist.
        Ok(()) | Err(Error::BackendRejected(_)) | Err(Error::NotFound) => {
            confirmation_view().into_response()
        }
        Err(Error::ConnectionFailed) => forgot_password_form(
            &form_data.email,
            Some("Could not reach the server. Check your connection and try again."),
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Unhandled error while requesting a password reset: {error}");
            forgot_password_form(
                &form_data.email,
                Some("An internal error occurred. Please try again later."),
            )
            .into_response()
        }
    }
}
