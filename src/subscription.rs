//! Subscription gate page and payment-link endpoint.
//!
//! Premium features (statement import) check the subscription claim baked
//! into the access token. Users without one land here; the upgrade button
//! asks the backend's payment service for a checkout link and sends the
//! browser to it. Payment itself happens entirely on the external service.

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState,
    api::ApiClient,
    auth::{AccessToken, Claims},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, link, loading_spinner},
    navigation::NavBar,
};

/// The state needed for the subscription pages.
#[derive(Debug, Clone)]
pub struct SubscriptionState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for SubscriptionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Display the upgrade page.
pub async fn get_subscribe_page(Extension(claims): Extension<Claims>) -> Response {
    subscribe_view(claims.subscription).into_response()
}

/// Request a payment link and send the browser to it.
///
/// The link is created fresh on every click; the backend's payment service
/// owns its lifetime.
pub async fn create_payment_link_endpoint(
    State(state): State<SubscriptionState>,
    Extension(token): Extension<AccessToken>,
) -> Response {
    match state.api.create_payment_link(&token).await {
        Ok(payment_link) => {
            (HxRedirect(payment_link.url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("could not create a payment link: {error}");
            error.into_alert_response()
        }
    }
}

fn subscribe_view(already_subscribed: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUBSCRIBE_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-4 text-center"
            {
                h1 class="text-xl font-bold" { "Zentavo Premium" }

                @if already_subscribed {
                    p
                    {
                        "Your subscription is active. Head over to the "
                        (link(endpoints::IMPORT_VIEW, "import page"))
                        " to upload a bank statement."
                    }
                } @else {
                    p
                    {
                        "Importing bank statements needs an active
                        subscription. Upgrading takes you to our payment
                        provider; once the payment clears, log in again to
                        refresh your access."
                    }

                    form
                        hx-post=(endpoints::PAYMENT_LINK)
                        hx-indicator="#indicator"
                        hx-disabled-elt="#submit-button"
                        hx-swap="none"
                        hx-target-error="#alert-container"
                    {
                        button
                            type="submit"
                            id="submit-button"
                            class=(BUTTON_PRIMARY_STYLE)
                        {
                            span class="inline htmx-indicator" id="indicator"
                            {
                                (loading_spinner())
                            }
                            "Upgrade"
                        }
                    }
                }
            }
        }
    );

    base("Subscribe", &[], &content)
}
