//! Category deletion endpoint.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState, Error,
    alert::Alert,
    api::ApiClient,
    auth::AccessToken,
    shared_templates::render,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryEndpointState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for DeleteCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Handle category deletion. Returns a success alert or an error alert.
pub async fn delete_category_endpoint(
    Path(category_id): Path<i64>,
    State(state): State<DeleteCategoryEndpointState>,
    Extension(token): Extension<AccessToken>,
) -> Response {
    match state.api.delete_category(&token, category_id).await {
        Ok(()) => render(
            StatusCode::OK,
            Alert::Success {
                message: "Category deleted".to_owned(),
                details: "Transactions that used it are now uncategorised.".to_owned(),
            }
            .into_html(),
        ),
        Err(error @ Error::NotFound) => error.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
