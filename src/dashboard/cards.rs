//! Summary cards for the dashboard: month totals with trend badges.

use maud::{Markup, html};

use crate::html::format_currency;

use super::buckets::{Trend, TrendDirection};

/// One summary card: a month total plus its trend.
pub(super) struct SummaryCard {
    /// The card heading, e.g. "Cash in".
    pub title: &'static str,
    /// The month total to display.
    pub amount: f64,
    /// The half-vs-half trend for the days elapsed so far.
    pub trend: Trend,
    /// Whether an upward trend is good news (income) or bad news (spending).
    pub up_is_good: bool,
}

/// Renders the row of summary cards at the top of the dashboard.
pub(super) fn summary_cards_view(cards: &[SummaryCard]) -> Markup {
    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                @for card in cards {
                    (summary_card(card))
                }
            }
        }
    }
}

fn summary_card(card: &SummaryCard) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md
                   flex flex-col justify-between"
        {
            h4 class="text-lg font-semibold mb-3" { (card.title) }

            div class="flex items-baseline justify-between" {
                div class="text-3xl font-bold" {
                    (format_currency(card.amount))
                }

                (trend_badge(card.trend, card.up_is_good))
            }
        }
    }
}

/// A colored badge showing which way the metric is moving.
///
/// The same direction colors differently depending on the metric: rising
/// income is green, rising spending is red.
fn trend_badge(trend: Trend, up_is_good: bool) -> Markup {
    let (arrow, is_good) = match trend.direction {
        TrendDirection::Up => ("\u{2191}", Some(up_is_good)),
        TrendDirection::Down => ("\u{2193}", Some(!up_is_good)),
        TrendDirection::Neutral => ("\u{2192}", None),
    };

    let style = match is_good {
        Some(true) => {
            "inline-flex items-center px-2.5 py-0.5 text-sm font-semibold \
            text-green-800 bg-green-100 rounded-full dark:bg-green-900 dark:text-green-300"
        }
        Some(false) => {
            "inline-flex items-center px-2.5 py-0.5 text-sm font-semibold \
            text-red-800 bg-red-100 rounded-full dark:bg-red-900 dark:text-red-300"
        }
        None => {
            "inline-flex items-center px-2.5 py-0.5 text-sm font-semibold \
            text-gray-800 bg-gray-100 rounded-full dark:bg-gray-700 dark:text-gray-300"
        }
    };

    html! {
        span class=(style) title="Compared to the first half of the month" {
            (arrow) " " (trend.label())
        }
    }
}

#[cfg(test)]
mod card_tests {
    use crate::dashboard::buckets::trend;

    use super::{SummaryCard, summary_cards_view, trend_badge};

    #[test]
    fn rising_income_renders_green_badge() {
        let html = trend_badge(trend(&[0.0, 0.0, 10.0, 10.0]), true).into_string();

        assert!(html.contains("+100%"));
        assert!(html.contains("text-green-800"));
    }

    #[test]
    fn rising_spending_renders_red_badge() {
        let html = trend_badge(trend(&[0.0, 0.0, 10.0, 10.0]), false).into_string();

        assert!(html.contains("+100%"));
        assert!(html.contains("text-red-800"));
    }

    #[test]
    fn falling_spending_renders_green_badge() {
        let html = trend_badge(trend(&[10.0, 10.0, 5.0, 5.0]), false).into_string();

        assert!(html.contains("-50%"));
        assert!(html.contains("text-green-800"));
    }

    #[test]
    fn neutral_trend_renders_gray_badge() {
        let html = trend_badge(trend(&[0.0, 0.0, 0.0, 0.0]), true).into_string();

        assert!(html.contains("0%"));
        assert!(html.contains("text-gray-800"));
    }

    #[test]
    fn cards_render_formatted_totals() {
        let cards = [
            SummaryCard {
                title: "Cash in",
                amount: 1200.0,
                trend: trend(&[]),
                up_is_good: true,
            },
            SummaryCard {
                title: "Cash out",
                amount: 350.5,
                trend: trend(&[]),
                up_is_good: false,
            },
        ];

        let html = summary_cards_view(&cards).into_string();

        assert!(html.contains("Cash in"));
        assert!(html.contains("$1,200.00"));
        assert!(html.contains("$350.50"));
    }
}
