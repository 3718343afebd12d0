//! Categories listing page.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::{ApiClient, Category, TransactionType},
    auth::AccessToken,
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links,
    },
    navigation::NavBar,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A category with its formatted edit/delete URLs for template rendering.
#[derive(Debug, Clone)]
struct CategoryRow {
    category: Category,
    edit_url: String,
    delete_url: String,
}

/// Render the categories listing page.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
    Extension(token): Extension<AccessToken>,
) -> Result<Response, Error> {
    let categories = state
        .api
        .categories(&token)
        .await
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

    let rows = categories
        .into_iter()
        .map(|category| CategoryRow {
            edit_url: endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id),
            delete_url: endpoints::format_endpoint(endpoints::DELETE_CATEGORY, category.id),
            category,
        })
        .collect::<Vec<_>>();

    Ok(categories_view(&rows).into_response())
}

fn restriction_label(category_type: Option<TransactionType>) -> &'static str {
    match category_type {
        None => "Income and expenses",
        Some(TransactionType::CashIn) => "Income only",
        Some(TransactionType::CashOut) => "Expenses only",
    }
}

/// A colored dot next to the category name, matching the chart colors.
fn color_swatch(color: &str) -> Markup {
    html!(
        span
            class="inline-block w-3 h-3 rounded-full border border-gray-300 dark:border-gray-600"
            style=(format!("background-color: {color};"))
        {}
    )
}

fn categories_view(rows: &[CategoryRow]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |row: &CategoryRow| {
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? Transactions keep their history but lose this category.",
            row.category.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex items-center gap-2"
                    {
                        (color_swatch(&row.category.color))
                        span { (row.category.name) }
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (restriction_label(row.category.category_type))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &row.edit_url,
                            &row.delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                (categories_cards_view(rows, new_category_route))

                section class="hidden lg:block dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Name"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Applies to"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (table_row(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No categories created yet. "
                                        a href=(new_category_route) class=(LINK_STYLE)
                                        {
                                            "Create your first category"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}

fn categories_cards_view(rows: &[CategoryRow], new_category_route: &str) -> Markup {
    html!(
        ul class="lg:hidden space-y-4"
        {
            @for row in rows {
                li class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
                    data-category-card="true"
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        div class="flex items-center gap-2"
                        {
                            (color_swatch(&row.category.color))
                            span class="text-sm font-medium text-gray-900 dark:text-white"
                            { (row.category.name) }
                        }

                        span class="text-xs text-gray-500 dark:text-gray-400"
                        { (restriction_label(row.category.category_type)) }
                    }

                    div class="mt-2 flex items-center gap-4 text-sm"
                    {
                        (edit_delete_action_links(
                            &row.edit_url,
                            &row.delete_url,
                            &format!(
                                "Are you sure you want to delete '{}'? Transactions keep their history but lose this category.",
                                row.category.name
                            ),
                            "closest [data-category-card='true']",
                            "outerHTML",
                        ))
                    }
                }
            }

            @if rows.is_empty() {
                li class="rounded border border-dashed border-gray-300 bg-white px-4 py-6 text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400"
                {
                    "No categories created yet. "
                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create your first category"
                    }
                }
            }
        }
    )
}
