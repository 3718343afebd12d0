//! Transaction editing page and endpoint.

use axum::{
    Extension, Form,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    api::{ApiClient, Category, PaymentMethod, Transaction, TransactionUpdate},
    auth::AccessToken,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    period::{MonthQuery, SelectedMonth},
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The state needed for updating a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionEndpointState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for UpdateTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Fetch the transaction with `transaction_id` from its month's listing.
///
/// The backend has no single-transaction read, so the edit link carries
/// the month along and the page picks the record out of that month.
async fn fetch_transaction(
    api: &ApiClient,
    token: &AccessToken,
    transaction_id: i64,
    selected: SelectedMonth,
) -> Result<Transaction, Error> {
    api.transactions(token, selected.month_number(), selected.year)
        .await?
        .into_iter()
        .find(|transaction| transaction.id == transaction_id)
        .ok_or(Error::NotFound)
}

/// Categories offered for `transaction`: unrestricted ones plus those
/// restricted to the transaction's own type.
fn selectable_categories(categories: Vec<Category>, transaction: &Transaction) -> Vec<Category> {
    categories
        .into_iter()
        .filter(|category| {
            category
                .category_type
                .is_none_or(|category_type| category_type == transaction.transaction_type)
        })
        .collect()
}

/// Render the page for editing a transaction.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Extension(token): Extension<AccessToken>,
    Path(transaction_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = OffsetDateTime::now_utc().date();
    let selected = SelectedMonth::resolve(query, today);

    let transaction = fetch_transaction(&state.api, &token, transaction_id, selected).await?;

    let categories = state
        .api
        .categories(&token)
        .await
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;
    let categories = selectable_categories(categories, &transaction);

    Ok(edit_transaction_view(&transaction, &categories, selected).into_response())
}

/// The raw data submitted by the edit transaction form.
#[derive(Debug, Clone, Deserialize)]
pub struct EditTransactionFormData {
    /// The new description.
    pub description: String,
    /// The category ID to assign, or empty for none.
    #[serde(default)]
    pub category_id: String,
    /// The corrected payment method.
    pub payment_method: PaymentMethod,
    /// The month the listing page was showing, echoed back for the redirect.
    #[serde(default)]
    pub month: Option<u8>,
    /// The year the listing page was showing, echoed back for the redirect.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Handle the edit transaction form submission.
///
/// An empty description is rejected before any backend call; a successful
/// update redirects back to the month the user came from.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<i64>,
    State(state): State<UpdateTransactionEndpointState>,
    Extension(token): Extension<AccessToken>,
    Form(form_data): Form<EditTransactionFormData>,
) -> Response {
    if form_data.description.trim().is_empty() {
        return Error::EmptyDescription.into_alert_response();
    }

    let update = TransactionUpdate {
        description: form_data.description.trim().to_owned(),
        category_id: form_data.category_id.parse().ok(),
        payment_method: form_data.payment_method,
    };

    match state
        .api
        .update_transaction(&token, transaction_id, &update)
        .await
    {
        Ok(_) => {
            let redirect_url = match (form_data.month, form_data.year) {
                (Some(month), Some(year)) => {
                    format!("{}?month={month}&year={year}", endpoints::TRANSACTIONS_VIEW)
                }
                _ => endpoints::TRANSACTIONS_VIEW.to_owned(),
            };

            (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error @ Error::NotFound) => error.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_transaction_view(
    transaction: &Transaction,
    categories: &[Category],
    selected: SelectedMonth,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_TRANSACTION, transaction.id);
    let assigned_category_id = transaction.category.as_ref().map(|category| category.id);

    let form = html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            input type="hidden" name="month" value=(selected.month_number());
            input type="hidden" name="year" value=(selected.year);

            div
            {
                p class=(FORM_LABEL_STYLE) { "Amount" }
                p class="text-lg font-semibold"
                {
                    (format_currency(transaction.amount)) " on " (transaction.date)
                }
            }

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Description"
                }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="Description"
                    required
                    autofocus
                    value=(transaction.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="category_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category"
                }

                select
                    id="category_id"
                    name="category_id"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[assigned_category_id.is_none()] {
                        "Uncategorised"
                    }

                    @for category in categories {
                        option
                            value=(category.id)
                            selected[assigned_category_id == Some(category.id)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div
            {
                label
                    for="payment_method"
                    class=(FORM_LABEL_STYLE)
                {
                    "Payment method"
                }

                select
                    id="payment_method"
                    name="payment_method"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for payment_method in PaymentMethod::all() {
                        option
                            value=(payment_method.as_str())
                            selected[payment_method == transaction.payment_method]
                        {
                            (payment_method.label())
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Transaction" }
        }
    };

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Transaction", &[], &content)
}

#[cfg(test)]
mod edit_transaction_page_tests {
    use axum::{
        Extension, Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        ApiClient, Error,
        auth::AccessToken,
        endpoints::{self, backend},
        period::MonthQuery,
        test_utils::{
            assert_form_input_with_value, assert_hx_endpoint, assert_valid_html, must_get_form,
            parse_html_document, spawn_backend,
        },
    };

    use super::{EditTransactionPageState, get_edit_transaction_page};

    fn token() -> Extension<AccessToken> {
        Extension(AccessToken::new("test-token"))
    }

    fn august_query() -> Query<MonthQuery> {
        Query(MonthQuery {
            month: Some(8),
            year: Some(2025),
        })
    }

    fn full_backend() -> Router {
        Router::new()
            .route(
                backend::TRANSACTIONS,
                get(|| async {
                    Json(json!([{
                        "id": 42,
                        "amount": -9.0,
                        "date": "2025-08-21",
                        "description": "Sushi",
                        "type": "CASH_OUT",
                        "paymentMethod": "DEBIT_CARD"
                    }]))
                }),
            )
            .route(
                backend::CATEGORIES,
                get(|| async {
                    Json(json!([
                        {"id": 7, "name": "Eating out", "color": "#f59e0b", "type": "CASH_OUT"},
                        {"id": 8, "name": "Salary", "color": "#22c55e", "type": "CASH_IN"},
                        {"id": 9, "name": "Misc", "color": "#3b82f6"}
                    ]))
                }),
            )
    }

    #[tokio::test]
    async fn edit_page_prefills_and_filters_categories() {
        let base_url = spawn_backend(full_backend()).await;
        let state = EditTransactionPageState {
            api: ApiClient::new(&base_url),
        };

        let response = get_edit_transaction_page(State(state), token(), Path(42), august_query())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::PUT_TRANSACTION, 42),
            "hx-put",
        );
        assert_form_input_with_value(&form, "description", "text", "Sushi");

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Eating out"), "matching-type category offered");
        assert!(text.contains("Misc"), "unrestricted category offered");
        assert!(
            !text.contains("Salary"),
            "income-only categories should not be offered for an expense"
        );

        let selected_payment =
            Selector::parse("select[name=payment_method] option[selected]").unwrap();
        let selected = html
            .select(&selected_payment)
            .next()
            .expect("a payment method should be pre-selected");
        assert_eq!(selected.value().attr("value"), Some("DEBIT_CARD"));
    }

    #[tokio::test]
    async fn unknown_id_returns_not_found() {
        let base_url = spawn_backend(full_backend()).await;
        let state = EditTransactionPageState {
            api: ApiClient::new(&base_url),
        };

        let result =
            get_edit_transaction_page(State(state), token(), Path(999), august_query()).await;

        assert_eq!(result.unwrap_err(), Error::NotFound);
    }
}
