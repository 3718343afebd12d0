//! Month selection shared by the dashboard and transactions pages.
//!
//! Both pages show one calendar month of data and navigate with
//! `?month=8&year=2025` query parameters. This module normalises those
//! parameters and derives the labels and neighbouring months for the
//! navigation links.

use serde::Deserialize;
use time::{Date, Month};

/// The raw `month`/`year` query parameters, before validation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MonthQuery {
    /// The month number, 1-12.
    pub month: Option<u8>,
    /// The calendar year.
    pub year: Option<i32>,
}

/// A validated month of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMonth {
    /// The month.
    pub month: Month,
    /// The calendar year.
    pub year: i32,
}

impl SelectedMonth {
    /// Resolve query parameters against today's date.
    ///
    /// Missing or out-of-range parameters fall back to the current month,
    /// mirroring what the page shows on first load.
    pub fn resolve(query: MonthQuery, today: Date) -> Self {
        let month = query
            .month
            .and_then(|month| Month::try_from(month).ok())
            .unwrap_or_else(|| today.month());
        let year = query.year.unwrap_or_else(|| today.year());

        Self { month, year }
    }

    /// The month before this one.
    pub fn previous(self) -> Self {
        let year = if self.month == Month::January {
            self.year - 1
        } else {
            self.year
        };

        Self {
            month: self.month.previous(),
            year,
        }
    }

    /// The month after this one.
    pub fn next(self) -> Self {
        let year = if self.month == Month::December {
            self.year + 1
        } else {
            self.year
        };

        Self {
            month: self.month.next(),
            year,
        }
    }

    /// The month number, 1-12, as the backend API expects it.
    pub fn month_number(self) -> u8 {
        self.month as u8
    }

    /// How many days this month has.
    pub fn days(self) -> u8 {
        self.month.length(self.year)
    }

    /// Whether `date` falls inside this month.
    pub fn contains(self, date: Date) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    /// A heading label, e.g. "August 2025".
    pub fn label(self) -> String {
        format!("{} {}", self.month, self.year)
    }

    /// The query string selecting this month, e.g. "month=8&year=2025".
    pub fn query_string(self) -> String {
        format!("month={}&year={}", self.month_number(), self.year)
    }

    /// A link to `route` scoped to this month.
    pub fn to_url(self, route: &str) -> String {
        format!("{route}?{}", self.query_string())
    }
}

/// Three-letter month abbreviation for chart axis labels.
pub fn short_month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod selected_month_tests {
    use time::{Month, macros::date};

    use super::{MonthQuery, SelectedMonth, short_month_name};

    const TODAY: time::Date = date!(2025 - 08 - 04);

    #[test]
    fn resolves_explicit_query() {
        let selected = SelectedMonth::resolve(
            MonthQuery {
                month: Some(2),
                year: Some(2024),
            },
            TODAY,
        );

        assert_eq!(selected.month, Month::February);
        assert_eq!(selected.year, 2024);
        assert_eq!(selected.days(), 29);
    }

    #[test]
    fn missing_params_fall_back_to_today() {
        let selected = SelectedMonth::resolve(
            MonthQuery {
                month: None,
                year: None,
            },
            TODAY,
        );

        assert_eq!(selected.month, Month::August);
        assert_eq!(selected.year, 2025);
    }

    #[test]
    fn out_of_range_month_falls_back_to_today() {
        let selected = SelectedMonth::resolve(
            MonthQuery {
                month: Some(13),
                year: Some(2024),
            },
            TODAY,
        );

        assert_eq!(selected.month, Month::August);
        assert_eq!(selected.year, 2024);
    }

    #[test]
    fn navigation_wraps_year_boundaries() {
        let january = SelectedMonth {
            month: Month::January,
            year: 2025,
        };
        let december = SelectedMonth {
            month: Month::December,
            year: 2024,
        };

        assert_eq!(january.previous(), december);
        assert_eq!(december.next(), january);
    }

    #[test]
    fn builds_links_and_labels() {
        let selected = SelectedMonth {
            month: Month::August,
            year: 2025,
        };

        assert_eq!(selected.label(), "August 2025");
        assert_eq!(selected.to_url("/dashboard"), "/dashboard?month=8&year=2025");
        assert_eq!(short_month_name(selected.month), "Aug");
    }

    #[test]
    fn contains_checks_month_and_year() {
        let selected = SelectedMonth {
            month: Month::August,
            year: 2025,
        };

        assert!(selected.contains(date!(2025 - 08 - 31)));
        assert!(!selected.contains(date!(2024 - 08 - 31)));
        assert!(!selected.contains(date!(2025 - 07 - 31)));
    }
}
