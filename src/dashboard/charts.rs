//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for the selected month:
//! - **Balance Chart**: the running balance over the days of the month
//! - **Expenses by Category**: the backend's per-category totals
//! - **Payment Methods**: the backend's per-payment-method totals
//! - **Last Six Months**: income vs expenses per month
//!
//! Each chart is generated as JSON configuration for the ECharts library
//! and rendered with corresponding HTML containers and JavaScript
//! initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title, VisualMap, VisualMapPiece},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Line, bar},
};
use maud::PreEscaped;

use crate::{
    api::{CategorySummary, MonthSummary, PaymentMethodSummary},
    html::HeadElement,
    period::short_month_name,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The running balance over the days of the month.
pub(super) fn balance_chart(month_label: &str, running_balance: &[f64]) -> Chart {
    let labels: Vec<String> = (1..=running_balance.len()).map(|day| day.to_string()).collect();

    Chart::new()
        .title(Title::new().text("Balance").subtext(month_label.to_owned()))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .visual_map(VisualMap::new().show(false).pieces(vec![
            VisualMapPiece::new().lte(-1).color("red"),
            VisualMapPiece::new().gte(0).color("green"),
        ]))
        .series(Line::new().name("Balance").data(running_balance.to_vec()))
}

/// The backend's per-category expense totals for the month.
pub(super) fn categories_chart(month_label: &str, summaries: &[CategorySummary]) -> Chart {
    let labels: Vec<String> = summaries.iter().map(|summary| summary.name.clone()).collect();
    let values: Vec<f64> = summaries.iter().map(|summary| summary.amount).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Category")
                .subtext(month_label.to_owned()),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(values),
        )
}

/// The backend's per-payment-method totals for the month.
pub(super) fn payment_methods_chart(
    month_label: &str,
    summaries: &[PaymentMethodSummary],
) -> Chart {
    let labels: Vec<String> = summaries
        .iter()
        .map(|summary| summary.payment_method.label().to_owned())
        .collect();
    let values: Vec<f64> = summaries.iter().map(|summary| summary.amount).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Payment Methods")
                .subtext(month_label.to_owned()),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Amount")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(values),
        )
}

/// Income vs expenses for the backend's last-six-months summary.
pub(super) fn last_six_months_chart(summaries: &[MonthSummary]) -> Chart {
    let labels: Vec<String> = summaries
        .iter()
        .map(|summary| {
            time::Month::try_from(summary.month)
                .map(short_month_name)
                .unwrap_or("?")
                .to_owned()
        })
        .collect();
    let cash_in: Vec<f64> = summaries.iter().map(|summary| summary.cash_in).collect();
    let cash_out: Vec<f64> = summaries.iter().map(|summary| summary.cash_out).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income and Expenses")
                .subtext("Last six months"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%").left(250))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Cash in")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(cash_in),
        )
        .series(
            bar::Bar::new()
                .name("Cash out")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(cash_out),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
