//! Transaction listing and editing.
//!
//! Transactions enter the system through statement imports; this module
//! only shows a month of them and lets the user correct the description,
//! category and payment method. Amounts and dates come from the bank and
//! are read-only.

mod edit;
mod transactions_page;

pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use transactions_page::get_transactions_page;
