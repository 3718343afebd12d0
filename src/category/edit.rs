//! Category editing page and endpoint.

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    api::{ApiClient, Category},
    auth::AccessToken,
    category::{
        build_category_payload,
        domain::CategoryFormData,
        form::{CategoryFormValues, category_form_view},
    },
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for the edit category page.
#[derive(Debug, Clone)]
pub struct EditCategoryPageState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for EditCategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryEndpointState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Fetch the category with `category_id`.
///
/// The backend exposes no single-category read, so the page re-fetches the
/// list and picks the record out. Direct navigation to an edit URL works
/// this way, where a cross-page memory of "the record being edited" would
/// not survive it.
async fn fetch_category(
    api: &ApiClient,
    token: &AccessToken,
    category_id: i64,
) -> Result<Category, Error> {
    api.categories(token)
        .await?
        .into_iter()
        .find(|category| category.id == category_id)
        .ok_or(Error::NotFound)
}

/// Render the category editing page.
pub async fn get_edit_category_page(
    Path(category_id): Path<i64>,
    State(state): State<EditCategoryPageState>,
    Extension(token): Extension<AccessToken>,
) -> Result<Response, Error> {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY, category_id);

    match fetch_category(&state.api, &token, category_id).await {
        Ok(category) => {
            let values = CategoryFormValues {
                name: &category.name,
                color: &category.color,
                category_type: category.category_type,
            };

            Ok(
                edit_category_view(&edit_endpoint, &update_endpoint, &values, "")
                    .into_response(),
            )
        }
        Err(Error::NotFound) => Ok(edit_category_view(
            &edit_endpoint,
            &update_endpoint,
            &CategoryFormValues::default(),
            "Category not found",
        )
        .into_response()),
        Err(error) => Err(error),
    }
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<i64>,
    State(state): State<UpdateCategoryEndpointState>,
    Extension(token): Extension<AccessToken>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY, category_id);

    let payload = match build_category_payload(&form_data) {
        Ok(payload) => payload,
        Err(error) => {
            let values = CategoryFormValues {
                name: &form_data.name,
                color: &form_data.color,
                category_type: form_data.parse_category_type(),
            };

            return edit_category_form_view(&update_endpoint, &values, &format!("Error: {error}"))
                .into_response();
        }
    };

    match state.api.update_category(&token, category_id, &payload).await {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::NotFound) => error.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_category_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    values: &CategoryFormValues,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_category_form_view(update_endpoint, values, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Category", &[], &content)
}

fn edit_category_form_view(
    update_endpoint: &str,
    values: &CategoryFormValues,
    error_message: &str,
) -> Markup {
    category_form_view(
        None,
        Some(update_endpoint),
        values,
        error_message,
        "Update Category",
    )
}


#[cfg(test)]
mod update_category_endpoint_tests {
    use axum::{
        Extension, Form, Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::put,
    };
    use serde_json::json;

    use crate::{
        ApiClient,
        api::CategoryPayload,
        auth::AccessToken,
        category::domain::CategoryFormData,
        endpoints::{self, backend},
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, must_get_form,
            parse_html_fragment, spawn_backend,
        },
    };

    use super::{UpdateCategoryEndpointState, update_category_endpoint};

    fn token() -> Extension<AccessToken> {
        Extension(AccessToken::new("test-token"))
    }

    fn form(name: &str) -> CategoryFormData {
        CategoryFormData {
            name: name.to_owned(),
            color: "#3b82f6".to_owned(),
            category_type: String::new(),
        }
    }

    #[tokio::test]
    async fn update_succeeds_and_redirects_to_list() {
        let router = Router::new().route(
            backend::CATEGORY,
            put(
                |Path(id): Path<i64>, Json(payload): Json<CategoryPayload>| async move {
                    assert_eq!(id, 7);
                    assert_eq!(payload.name, "Food");

                    Json(json!({
                        "id": 7,
                        "name": payload.name,
                        "color": payload.color
                    }))
                },
            ),
        );
        let base_url = spawn_backend(router).await;
        let state = UpdateCategoryEndpointState {
            api: ApiClient::new(&base_url),
        };

        let response = update_category_endpoint(Path(7), State(state), token(), Form(form("Food")))
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
    }

    #[tokio::test]
    async fn unknown_id_returns_not_found_alert() {
        let router = Router::new().route(
            backend::CATEGORY,
            put(|| async { StatusCode::NOT_FOUND }),
        );
        let base_url = spawn_backend(router).await;
        let state = UpdateCategoryEndpointState {
            api: ApiClient::new(&base_url),
        };

        let response =
            update_category_endpoint(Path(999), State(state), token(), Form(form("Food"))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_name_shows_error_without_any_backend_call() {
        let router = Router::new().route(
            backend::CATEGORY,
            put(|| async { panic!("the backend should not be called") }),
        );
        let base_url = spawn_backend(router).await;
        let state = UpdateCategoryEndpointState {
            api: ApiClient::new(&base_url),
        };

        let response =
            update_category_endpoint(Path(7), State(state), token(), Form(form(""))).await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category name cannot be empty");
    }
}
