//! Dashboard HTTP handlers and view rendering.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    api::{ApiClient, CategorySummary, MonthSummary, PaymentMethodSummary, Transaction,
        TransactionType},
    auth::AccessToken,
    dashboard::{
        buckets::{DailyBuckets, trend},
        cards::{SummaryCard, summary_cards_view},
        charts::{
            DashboardChart, balance_chart, categories_chart, charts_script,
            last_six_months_chart, payment_methods_chart,
        },
    },
    endpoints,
    html::{HeadElement, base, link, month_nav},
    navigation::NavBar,
    period::{MonthQuery, SelectedMonth},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for the Zentavo backend API.
    pub api: ApiClient,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    cards: [SummaryCard; 3],
    charts: [DashboardChart; 4],
}

/// Display a page with an overview of the user's month.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = OffsetDateTime::now_utc().date();
    let selected = SelectedMonth::resolve(query, today);
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let transactions = state
        .api
        .transactions(&token, selected.month_number(), selected.year)
        .await
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar, selected).into_response());
    }

    let expense_categories = state
        .api
        .category_summary(
            &token,
            selected.month_number(),
            selected.year,
            TransactionType::CashOut,
        )
        .await
        .inspect_err(|error| tracing::error!("could not get category summary: {error}"))?;

    let payment_methods = state
        .api
        .payment_method_summary(&token, selected.month_number(), selected.year)
        .await
        .inspect_err(|error| tracing::error!("could not get payment method summary: {error}"))?;

    let six_months = state
        .api
        .last_six_months(&token)
        .await
        .inspect_err(|error| tracing::error!("could not get six month summary: {error}"))?;

    let data = build_dashboard_data(
        &transactions,
        &expense_categories,
        &payment_methods,
        &six_months,
        selected,
        today,
    );

    Ok(dashboard_view(nav_bar, selected, &data).into_response())
}

/// Derive the cards and charts from the month's data.
///
/// Trends only consider the days elapsed so far: when viewing the current
/// month the buckets are cut at today's day of month, past months use all
/// of their days.
fn build_dashboard_data(
    transactions: &[Transaction],
    expense_categories: &[CategorySummary],
    payment_methods: &[PaymentMethodSummary],
    six_months: &[MonthSummary],
    selected: SelectedMonth,
    today: time::Date,
) -> DashboardData {
    let buckets = DailyBuckets::from_transactions(transactions, selected.days());

    let elapsed_days = if selected.contains(today) {
        today.day() as usize
    } else {
        buckets.balance.len()
    };

    let cards = [
        SummaryCard {
            title: "Cash in",
            amount: buckets.total_cash_in(),
            trend: trend(&buckets.cash_in[..elapsed_days]),
            up_is_good: true,
        },
        SummaryCard {
            title: "Cash out",
            amount: buckets.total_cash_out(),
            trend: trend(&buckets.cash_out[..elapsed_days]),
            up_is_good: false,
        },
        SummaryCard {
            title: "Balance",
            amount: buckets.total_balance(),
            trend: trend(&buckets.balance[..elapsed_days]),
            up_is_good: true,
        },
    ];

    let month_label = selected.label();
    let charts = [
        DashboardChart {
            id: "balance-chart",
            options: balance_chart(&month_label, &buckets.running_balance()).to_string(),
        },
        DashboardChart {
            id: "categories-chart",
            options: categories_chart(&month_label, expense_categories).to_string(),
        },
        DashboardChart {
            id: "payment-methods-chart",
            options: payment_methods_chart(&month_label, payment_methods).to_string(),
        },
        DashboardChart {
            id: "six-months-chart",
            options: last_six_months_chart(six_months).to_string(),
        },
    ];

    DashboardData { cards, charts }
}

/// Renders the dashboard page when the month has no transactions.
fn dashboard_no_data_view(nav_bar: NavBar, selected: SelectedMonth) -> Markup {
    let nav_bar = nav_bar.into_html();
    let import_link = link(endpoints::IMPORT_VIEW, "importing a bank statement");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            (month_nav(selected, endpoints::DASHBOARD_VIEW))

            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once this month has some
                transactions. You can add transactions by " (import_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with cards and charts.
fn dashboard_view(nav_bar: NavBar, selected: SelectedMonth, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (month_nav(selected, endpoints::DASHBOARD_VIEW))

            (summary_cards_view(&data.cards))

            section
                id="charts"
                class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @for chart in &data.charts {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    }
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&data.charts),
    ];

    base("Dashboard", &scripts, &content)
}
