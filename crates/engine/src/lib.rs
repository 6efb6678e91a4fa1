//! Record store and dashboard aggregation for the finance tracker.
//!
//! The [`Engine`] owns the database connection and exposes CRUD operations for
//! invoices and expenses. The [`dashboard`] module turns the complete record
//! set into totals, a recent-activity feed and a category breakdown.

pub use dashboard::{
    CategoryTotal, DashboardSnapshot, RECENT_TRANSACTIONS_LIMIT, RecordStore, TransactionKind,
    TransactionView, compute_snapshot, load_snapshot,
};
pub use error::EngineError;
pub use expenses::{Expense, NewExpense};
pub use invoices::{
    Invoice, InvoicePatch, InvoiceStatus, LineItem, LineItems, NewInvoice, RecurringInterval,
};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};

pub mod dashboard;
mod error;
mod expenses;
mod invoices;
mod money;
mod ops;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
