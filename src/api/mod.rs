//! The client for the Zentavo backend API.
//!
//! Every piece of data this application shows is owned by the backend and
//! fetched through this module. The submodules split the concern in two:
//! the DTOs mirroring the backend's JSON shapes, and the HTTP client that
//! maps backend statuses onto [crate::Error].

mod client;
mod models;

pub use client::ApiClient;
pub use models::{
    Category, CategoryPayload, CategorySummary, ImportSummary, MonthSummary, PaymentLink,
    PaymentMethod, PaymentMethodSummary, Transaction, TransactionType, TransactionUpdate, User,
};
