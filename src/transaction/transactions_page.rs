//! Transactions listing page for a selected month.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    api::{ApiClient, Transaction},
    auth::AccessToken,
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, currency_rounded_with_tooltip, link, month_nav,
    },
    navigation::NavBar,
    period::{MonthQuery, SelectedMonth},
};

/// The state needed for the transactions listing page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A transaction with its formatted edit URL for template rendering.
#[derive(Debug, Clone)]
struct TransactionRow {
    transaction: Transaction,
    edit_url: String,
}

/// Render a month of transactions, newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = OffsetDateTime::now_utc().date();
    let selected = SelectedMonth::resolve(query, today);

    let mut transactions = state
        .api
        .transactions(&token, selected.month_number(), selected.year)
        .await
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let rows = transactions
        .into_iter()
        .map(|transaction| TransactionRow {
            // The month rides along so the edit page can find the record
            // in the backend's month listing.
            edit_url: format!(
                "{}?{}",
                endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id),
                selected.query_string()
            ),
            transaction,
        })
        .collect::<Vec<_>>();

    Ok(transactions_view(selected, &rows).into_response())
}

fn amount_cell(transaction: &Transaction) -> Markup {
    let style = if transaction.amount < 0.0 {
        "text-red-600 dark:text-red-400 whitespace-nowrap"
    } else {
        "text-green-600 dark:text-green-400 whitespace-nowrap"
    };

    html!(
        span class=(style) { (currency_rounded_with_tooltip(transaction.amount)) }
    )
}

fn category_badge(transaction: &Transaction) -> Markup {
    match &transaction.category {
        Some(category) => html!(
            span
                class="inline-flex items-center gap-1.5 rounded-full px-2.5 py-0.5 text-xs
                    font-medium text-gray-900 dark:text-white"
            {
                span
                    class="inline-block w-2 h-2 rounded-full"
                    style=(format!("background-color: {};", category.color))
                {}
                (category.name)
            }
        ),
        None => html!(
            span class="text-xs text-gray-400 dark:text-gray-500" { "Uncategorised" }
        ),
    }
}

fn transactions_view(selected: SelectedMonth, rows: &[TransactionRow]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let table_row = |row: &TransactionRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (row.transaction.date) }
                td class=(TABLE_CELL_STYLE) { (row.transaction.description) }
                td class=(TABLE_CELL_STYLE) { (category_badge(&row.transaction)) }
                td class=(TABLE_CELL_STYLE) { (row.transaction.payment_method.label()) }
                td class=(TABLE_CELL_STYLE) { (amount_cell(&row.transaction)) }
                td class=(TABLE_CELL_STYLE)
                {
                    a href=(row.edit_url) class=(LINK_STYLE) { "Edit" }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (month_nav(selected, endpoints::TRANSACTIONS_VIEW))

            @if rows.is_empty() {
                p
                {
                    "No transactions for this month. You can add some by "
                    (link(endpoints::IMPORT_VIEW, "importing a bank statement"))
                    "."
                }
            } @else {
                (transactions_cards_view(rows))

                section class="hidden lg:block dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Payment" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (table_row(row))
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

fn transactions_cards_view(rows: &[TransactionRow]) -> Markup {
    html!(
        ul class="lg:hidden space-y-4 w-full max-w-xl mx-auto"
        {
            @for row in rows {
                li class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        div
                        {
                            p class="text-sm font-medium text-gray-900 dark:text-white"
                            { (row.transaction.description) }

                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                (row.transaction.date)
                                " \u{00b7} "
                                (row.transaction.payment_method.label())
                            }
                        }

                        (amount_cell(&row.transaction))
                    }

                    div class="mt-2 flex items-center justify-between gap-4 text-sm"
                    {
                        (category_badge(&row.transaction))

                        a href=(row.edit_url) class=(LINK_STYLE) { "Edit" }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod transactions_page_tests {
    use axum::{
        Extension, Json, Router,
        extract::{Query, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        ApiClient, Error,
        auth::AccessToken,
        endpoints::backend,
        period::MonthQuery,
        test_utils::{assert_valid_html, parse_html_document, spawn_backend},
    };

    use super::{TransactionsPageState, get_transactions_page};

    fn token() -> Extension<AccessToken> {
        Extension(AccessToken::new("test-token"))
    }

    fn august_query() -> Query<MonthQuery> {
        Query(MonthQuery {
            month: Some(8),
            year: Some(2025),
        })
    }

    fn backend_with_transactions() -> Router {
        Router::new().route(
            backend::TRANSACTIONS,
            get(|| async {
                Json(json!([
                    {
                        "id": 1,
                        "amount": -42.0,
                        "date": "2025-08-02",
                        "description": "PAK N SAVE",
                        "type": "CASH_OUT",
                        "paymentMethod": "DEBIT_CARD",
                        "category": {"id": 7, "name": "Groceries", "color": "#22c55e"}
                    },
                    {
                        "id": 2,
                        "amount": 1200.0,
                        "date": "2025-08-01",
                        "description": "SALARY",
                        "type": "CASH_IN",
                        "paymentMethod": "TRANSFER"
                    }
                ]))
            }),
        )
    }

    #[tokio::test]
    async fn lists_the_months_transactions() {
        let base_url = spawn_backend(backend_with_transactions()).await;
        let state = TransactionsPageState {
            api: ApiClient::new(&base_url),
        };

        let response = get_transactions_page(State(state), token(), august_query())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("PAK N SAVE"));
        assert!(text.contains("SALARY"));
        assert!(text.contains("Groceries"));
        assert!(text.contains("Uncategorised"));
        assert!(text.contains("August 2025"));
    }

    #[tokio::test]
    async fn edit_links_carry_the_selected_month() {
        let base_url = spawn_backend(backend_with_transactions()).await;
        let state = TransactionsPageState {
            api: ApiClient::new(&base_url),
        };

        let response = get_transactions_page(State(state), token(), august_query())
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let edit_link =
            Selector::parse("a[href='/transactions/1/edit?month=8&year=2025']").unwrap();
        assert!(
            html.select(&edit_link).next().is_some(),
            "edit links should include the month query so the edit page can look the record up"
        );
    }

    #[tokio::test]
    async fn empty_month_prompts_to_import() {
        let router = Router::new().route(
            backend::TRANSACTIONS,
            get(|| async { Json(json!([])) }),
        );
        let base_url = spawn_backend(router).await;
        let state = TransactionsPageState {
            api: ApiClient::new(&base_url),
        };

        let response = get_transactions_page(State(state), token(), august_query())
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No transactions for this month"));
    }

    #[tokio::test]
    async fn backend_401_propagates_as_session_expired() {
        let router = Router::new().route(
            backend::TRANSACTIONS,
            get(|| async { StatusCode::UNAUTHORIZED }),
        );
        let base_url = spawn_backend(router).await;
        let state = TransactionsPageState {
            api: ApiClient::new(&base_url),
        };

        let result = get_transactions_page(State(state), token(), august_query()).await;

        assert_eq!(result.unwrap_err(), Error::SessionExpired);
    }
}
