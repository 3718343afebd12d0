//! The data transfer objects mirrored from the Zentavo backend API.
//!
//! These shapes are owned by the backend. The client treats them as opaque:
//! no invariants (uniqueness, referential integrity, monetary precision)
//! are enforced here.

use serde::{Deserialize, Serialize};
use time::Date;

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Income.
    CashIn,
    /// An expense.
    CashOut,
}

impl TransactionType {
    /// The wire representation used in backend URLs, e.g.
    /// `/api/transactions/dashboard/categories/{month}/{year}/CASH_OUT`.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::CashIn => "CASH_IN",
            TransactionType::CashOut => "CASH_OUT",
        }
    }
}

/// How a transaction was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Credit card purchases.
    CreditCard,
    /// Debit card purchases.
    DebitCard,
    /// Cash payments.
    Cash,
    /// Instant bank transfers.
    Pix,
    /// Regular bank transfers.
    Transfer,
    /// Anything the statement parser could not classify.
    Other,
}

impl PaymentMethod {
    /// A human readable label for tables and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::DebitCard => "Debit card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Other => "Other",
        }
    }

    /// The wire representation, matching the serde rename.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Transfer => "TRANSFER",
            PaymentMethod::Other => "OTHER",
        }
    }

    /// All payment methods, in the order forms should list them.
    pub fn all() -> [PaymentMethod; 6] {
        [
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Cash,
            PaymentMethod::Pix,
            PaymentMethod::Transfer,
            PaymentMethod::Other,
        ]
    }
}

/// A transaction category, e.g. "Groceries".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The backend's identifier for the category.
    pub id: i64,
    /// The display name.
    pub name: String,
    /// A hex display color, e.g. `#22c55e`.
    pub color: String,
    /// Restricts the category to one transaction type, or `None` for both.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<TransactionType>,
}

/// The payload for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    /// The display name.
    pub name: String,
    /// A hex display color, e.g. `#22c55e`.
    pub color: String,
    /// Restricts the category to one transaction type, or `None` for both.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<TransactionType>,
}

/// A single bank transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The backend's identifier for the transaction.
    pub id: i64,
    /// The signed amount. Expenses are negative.
    pub amount: f64,
    /// The day the transaction happened.
    pub date: Date,
    /// The description, usually taken from the bank statement.
    pub description: String,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
    /// The assigned category, if any.
    #[serde(default)]
    pub category: Option<Category>,
}

/// The payload for updating a transaction.
///
/// Amounts and dates come from imported statements and are not editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    /// The new description.
    pub description: String,
    /// The category to assign, or `None` to clear it.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// The corrected payment method.
    pub payment_method: PaymentMethod,
}

/// The user that owns the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The backend's identifier for the user.
    pub id: i64,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
}

/// Totals for one payment method within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodSummary {
    /// The payment method the totals are for.
    pub payment_method: PaymentMethod,
    /// The summed absolute amount for the month.
    pub amount: f64,
}

/// Totals for one category within a month, for a single transaction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// The category name.
    pub name: String,
    /// The category's display color.
    pub color: String,
    /// The summed absolute amount for the month.
    pub amount: f64,
}

/// Income and expense totals for one month, used by the six-month chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// The month, 1-12.
    pub month: u8,
    /// The calendar year.
    pub year: i32,
    /// The summed income for the month.
    pub cash_in: f64,
    /// The summed expenses for the month, as a positive number.
    pub cash_out: f64,
}

/// The backend's report after parsing and importing a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// How many transactions the statement produced.
    #[serde(default)]
    pub imported: usize,
}

/// A payment link created by the external payment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    /// The URL the browser should be sent to.
    pub url: String,
}
