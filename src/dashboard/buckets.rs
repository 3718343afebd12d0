//! Per-day aggregation and trend computation for the dashboard.
//!
//! Given the transactions of the selected month, builds fixed-length
//! per-day sequences (one slot per day of the month) for cash in, cash
//! out and their difference, and derives a simple trend indicator by
//! comparing the first and second half of the days elapsed so far.

use crate::api::{Transaction, TransactionType};

/// Trend percentages within this distance of zero display as neutral.
const TREND_THRESHOLD_PERCENT: i64 = 5;

/// Per-day totals for one month.
///
/// Each vector has one entry per day of the month. Rebuilt from the
/// month's transactions on every page load, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DailyBuckets {
    /// Income per day, as positive numbers.
    pub cash_in: Vec<f64>,
    /// Expenses per day, as positive numbers.
    pub cash_out: Vec<f64>,
    /// Cash in minus cash out, per day.
    pub balance: Vec<f64>,
}

impl DailyBuckets {
    /// Bucket `transactions` by day of month.
    ///
    /// `days_in_month` fixes the output length. Transactions dated past
    /// the end of the month are ignored rather than defended against,
    /// since the backend already scopes the query to one month.
    pub(super) fn from_transactions(transactions: &[Transaction], days_in_month: u8) -> Self {
        let days = days_in_month as usize;
        let mut cash_in = vec![0.0; days];
        let mut cash_out = vec![0.0; days];

        for transaction in transactions {
            let day = transaction.date.day() as usize;
            if day > days {
                continue;
            }

            match transaction.transaction_type {
                TransactionType::CashIn => cash_in[day - 1] += transaction.amount.abs(),
                TransactionType::CashOut => cash_out[day - 1] += transaction.amount.abs(),
            }
        }

        let balance = cash_in
            .iter()
            .zip(cash_out.iter())
            .map(|(cash_in, cash_out)| cash_in - cash_out)
            .collect();

        Self {
            cash_in,
            cash_out,
            balance,
        }
    }

    pub(super) fn total_cash_in(&self) -> f64 {
        self.cash_in.iter().sum()
    }

    pub(super) fn total_cash_out(&self) -> f64 {
        self.cash_out.iter().sum()
    }

    pub(super) fn total_balance(&self) -> f64 {
        self.total_cash_in() - self.total_cash_out()
    }

    /// The cumulative balance over the month, for the balance chart.
    pub(super) fn running_balance(&self) -> Vec<f64> {
        let mut cumulative = 0.0;

        self.balance
            .iter()
            .map(|amount| {
                cumulative += amount;
                cumulative
            })
            .collect()
    }
}

/// The direction a metric is moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TrendDirection {
    /// More than [TREND_THRESHOLD_PERCENT] above the first half.
    Up,
    /// More than [TREND_THRESHOLD_PERCENT] below the first half.
    Down,
    /// Within the threshold, or not enough data to tell.
    Neutral,
}

/// A trend indicator for a summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Trend {
    pub direction: TrendDirection,
    /// Rounded signed percentage change between the two halves.
    pub percent: i64,
}

impl Trend {
    fn neutral() -> Self {
        Self {
            direction: TrendDirection::Neutral,
            percent: 0,
        }
    }

    /// The display label, e.g. "+100%" or "-50%".
    pub(super) fn label(self) -> String {
        if self.percent > 0 {
            format!("+{}%", self.percent)
        } else {
            format!("{}%", self.percent)
        }
    }
}

/// Compare the first and second half of `values` and classify the change.
///
/// `values` should only cover the days elapsed so far: when viewing the
/// current month, slice the buckets up to today's day of month before
/// calling this.
///
/// Both halves summing to zero is neutral. A zero first half with a
/// non-zero second half reads as "+100%" since there is no baseline to
/// divide by. Fewer than two values is neutral, there is nothing to
/// compare yet.
pub(super) fn trend(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::neutral();
    }

    let midpoint = values.len() / 2;
    let first_half: f64 = values[..midpoint].iter().sum();
    let second_half: f64 = values[midpoint..].iter().sum();

    if first_half == 0.0 && second_half == 0.0 {
        return Trend::neutral();
    }

    if first_half == 0.0 {
        return Trend {
            direction: TrendDirection::Up,
            percent: 100,
        };
    }

    let percent = ((second_half - first_half) / first_half.abs() * 100.0).round() as i64;

    let direction = if percent > TREND_THRESHOLD_PERCENT {
        TrendDirection::Up
    } else if percent < -TREND_THRESHOLD_PERCENT {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    };

    Trend { direction, percent }
}

#[cfg(test)]
mod bucket_tests {
    use time::macros::date;

    use crate::api::{PaymentMethod, Transaction, TransactionType};

    use super::DailyBuckets;

    fn transaction(amount: f64, date: time::Date, transaction_type: TransactionType) -> Transaction {
        Transaction {
            id: 0,
            amount,
            date,
            description: String::new(),
            transaction_type,
            payment_method: PaymentMethod::Other,
            category: None,
        }
    }

    #[test]
    fn buckets_sum_per_day() {
        let transactions = vec![
            transaction(1200.0, date!(2025 - 08 - 01), TransactionType::CashIn),
            transaction(-35.5, date!(2025 - 08 - 02), TransactionType::CashOut),
            transaction(-14.5, date!(2025 - 08 - 02), TransactionType::CashOut),
        ];

        let buckets = DailyBuckets::from_transactions(&transactions, 31);

        assert_eq!(buckets.cash_in.len(), 31);
        assert_eq!(buckets.cash_in[0], 1200.0);
        assert_eq!(buckets.cash_out[1], 50.0);
        assert_eq!(buckets.balance[0], 1200.0);
        assert_eq!(buckets.balance[1], -50.0);
        assert_eq!(buckets.balance[2], 0.0);
    }

    #[test]
    fn expense_sign_does_not_matter() {
        // Backends disagree on whether CASH_OUT amounts are signed; both
        // shapes must bucket the same.
        let signed = DailyBuckets::from_transactions(
            &[transaction(-42.0, date!(2025 - 08 - 05), TransactionType::CashOut)],
            31,
        );
        let unsigned = DailyBuckets::from_transactions(
            &[transaction(42.0, date!(2025 - 08 - 05), TransactionType::CashOut)],
            31,
        );

        assert_eq!(signed, unsigned);
        assert_eq!(signed.cash_out[4], 42.0);
    }

    #[test]
    fn handles_empty_month() {
        let buckets = DailyBuckets::from_transactions(&[], 30);

        assert_eq!(buckets.total_cash_in(), 0.0);
        assert_eq!(buckets.total_cash_out(), 0.0);
        assert_eq!(buckets.total_balance(), 0.0);
    }

    #[test]
    fn running_balance_accumulates() {
        let transactions = vec![
            transaction(100.0, date!(2025 - 02 - 01), TransactionType::CashIn),
            transaction(40.0, date!(2025 - 02 - 02), TransactionType::CashOut),
            transaction(10.0, date!(2025 - 02 - 04), TransactionType::CashOut),
        ];

        let buckets = DailyBuckets::from_transactions(&transactions, 28);
        let running = buckets.running_balance();

        assert_eq!(running[0], 100.0);
        assert_eq!(running[1], 60.0);
        assert_eq!(running[2], 60.0);
        assert_eq!(running[3], 50.0);
        assert_eq!(running[27], 50.0);
    }
}
