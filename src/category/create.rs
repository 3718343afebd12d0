//! Category creation page and endpoint.

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    api::ApiClient,
    auth::AccessToken,
    category::{
        build_category_payload,
        domain::CategoryFormData,
        form::{CategoryFormValues, category_form_view},
    },
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page() -> Response {
    new_category_view().into_response()
}

/// Handle category creation form submission.
///
/// Validation failures re-render the form without touching the backend;
/// only a valid submission issues the create call.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Extension(token): Extension<AccessToken>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let payload = match build_category_payload(&form_data) {
        Ok(payload) => payload,
        Err(error) => {
            return new_category_form_view(&form_data, &format!("Error: {error}")).into_response();
        }
    };

    match state.api.create_category(&token, &payload).await {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}

fn new_category_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = category_form_view(
        Some(endpoints::POST_CATEGORY),
        None,
        &CategoryFormValues::default(),
        "",
        "Create Category",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Category", &[], &content)
}

fn new_category_form_view(form_data: &CategoryFormData, error_message: &str) -> Markup {
    let values = CategoryFormValues {
        name: &form_data.name,
        color: &form_data.color,
        category_type: form_data.parse_category_type(),
    };

    category_form_view(
        Some(endpoints::POST_CATEGORY),
        None,
        &values,
        error_message,
        "Create Category",
    )
}


#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{
        Extension, Form, Json, Router,
        extract::State,
        http::{StatusCode, header::CONTENT_TYPE},
        routing::post,
    };
    use serde_json::json;

    use crate::{
        ApiClient,
        api::CategoryPayload,
        auth::AccessToken,
        category::domain::CategoryFormData,
        endpoints::{self, backend},
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, get_header,
            must_get_form, parse_html_fragment, spawn_backend,
        },
    };

    use super::{CreateCategoryEndpointState, create_category_endpoint};

    fn token() -> Extension<AccessToken> {
        Extension(AccessToken::new("test-token"))
    }

    fn form(name: &str) -> CategoryFormData {
        CategoryFormData {
            name: name.to_owned(),
            color: "#22c55e".to_owned(),
            category_type: "CASH_OUT".to_owned(),
        }
    }

    #[tokio::test]
    async fn valid_submission_posts_once_and_redirects_to_list() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let counter = call_count.clone();

        let router = Router::new().route(
            backend::CATEGORIES,
            post(move |Json(payload): Json<CategoryPayload>| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(payload.name, "Groceries");

                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "id": 1,
                            "name": payload.name,
                            "color": payload.color,
                            "type": "CASH_OUT"
                        })),
                    )
                }
            }),
        );
        let base_url = spawn_backend(router).await;
        let state = CreateCategoryEndpointState {
            api: ApiClient::new(&base_url),
        };

        let response =
            create_category_endpoint(State(state), token(), Form(form("Groceries"))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
        assert_eq!(
            call_count.load(Ordering::SeqCst),
            1,
            "the create endpoint should be called exactly once"
        );
    }

    #[tokio::test]
    async fn empty_name_shows_error_without_any_backend_call() {
        // A backend URL that panics on contact: validation must fail first.
        let router = Router::new().route(
            backend::CATEGORIES,
            post(|| async { panic!("the backend should not be called") }),
        );
        let base_url = spawn_backend(router).await;
        let state = CreateCategoryEndpointState {
            api: ApiClient::new(&base_url),
        };

        let response = create_category_endpoint(State(state), token(), Form(form(""))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_header(&response, CONTENT_TYPE.as_str()),
            "text/html; charset=utf-8"
        );

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category name cannot be empty");
    }

    #[tokio::test]
    async fn backend_rejection_renders_alert() {
        let router = Router::new().route(
            backend::CATEGORIES,
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "A category with this name already exists"})),
                )
            }),
        );
        let base_url = spawn_backend(router).await;
        let state = CreateCategoryEndpointState {
            api: ApiClient::new(&base_url),
        };

        let response =
            create_category_endpoint(State(state), token(), Form(form("Groceries"))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("A category with this name already exists"));
    }
}
