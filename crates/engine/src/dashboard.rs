//! Dashboard aggregation.
//!
//! Reduces the complete invoice and expense sets into a [`DashboardSnapshot`]:
//! income/expense/balance totals, a merged recent-activity feed and the
//! expense breakdown per category. Nothing is cached; every snapshot is
//! recomputed from the records handed in.
//!
//! Feed ordering: the invoice feed is placed before the expense feed and the
//! merged list is stable-sorted by date, newest first. On equal dates an
//! invoice therefore comes before an expense, and records of the same kind
//! keep the order in which the store returned them.

use std::{collections::BTreeMap, future::Future};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Expense, Invoice, Money, ResultEngine};

/// Maximum length of the recent-activity feed, and how many records of each
/// kind are considered for it.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// An invoice or expense projected for the recent-activity feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionView {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: Money,
    pub kind: TransactionKind,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Money,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`, may be negative.
    pub balance: Money,
    pub recent_transactions: Vec<TransactionView>,
    /// One entry per distinct category, ordered by category name.
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// Read side of the record store, as needed by the dashboard.
///
/// Both calls return the complete, unfiltered record set.
pub trait RecordStore {
    fn list_all_invoices(&self) -> impl Future<Output = ResultEngine<Vec<Invoice>>> + Send;

    fn list_all_expenses(&self) -> impl Future<Output = ResultEngine<Vec<Expense>>> + Send;
}

/// Read both record sets from `store` and aggregate them.
///
/// Fails with the store's error if either read fails; no partial snapshot is
/// ever produced.
pub async fn load_snapshot<S>(store: &S) -> ResultEngine<DashboardSnapshot>
where
    S: RecordStore + Sync,
{
    let invoices = store.list_all_invoices().await?;
    let expenses = store.list_all_expenses().await?;
    Ok(compute_snapshot(&invoices, &expenses))
}

/// Aggregate the given records into a [`DashboardSnapshot`].
pub fn compute_snapshot(invoices: &[Invoice], expenses: &[Expense]) -> DashboardSnapshot {
    let total_income = total_income(invoices);
    let total_expenses = total_expenses(expenses);

    DashboardSnapshot {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        recent_transactions: recent_transactions(invoices, expenses),
        expenses_by_category: expenses_by_category(expenses),
    }
}

/// Only paid invoices are realized income.
fn total_income(invoices: &[Invoice]) -> Money {
    invoices
        .iter()
        .filter(|invoice| invoice.is_paid())
        .map(|invoice| invoice.amount)
        .sum()
}

fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|expense| expense.amount).sum()
}

fn recent_transactions(invoices: &[Invoice], expenses: &[Expense]) -> Vec<TransactionView> {
    let invoice_feed = most_recent(invoices, |invoice| invoice.date)
        .into_iter()
        .map(invoice_view);
    let expense_feed = most_recent(expenses, |expense| expense.date)
        .into_iter()
        .map(expense_view);

    let mut feed: Vec<TransactionView> = invoice_feed.chain(expense_feed).collect();
    feed.sort_by(|a, b| b.date.cmp(&a.date));
    feed.truncate(RECENT_TRANSACTIONS_LIMIT);
    feed
}

/// The newest [`RECENT_TRANSACTIONS_LIMIT`] records, newest first. `sort_by`
/// is stable, so equal dates keep their input order.
fn most_recent<T>(records: &[T], date: impl Fn(&T) -> DateTime<Utc>) -> Vec<&T> {
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by(|a, b| date(b).cmp(&date(a)));
    sorted.truncate(RECENT_TRANSACTIONS_LIMIT);
    sorted
}

fn invoice_view(invoice: &Invoice) -> TransactionView {
    TransactionView {
        id: invoice.id,
        date: invoice.date,
        amount: invoice.amount,
        kind: TransactionKind::Income,
        label: format!("Invoice for {}", invoice.client_name),
    }
}

fn expense_view(expense: &Expense) -> TransactionView {
    TransactionView {
        id: expense.id,
        date: expense.date,
        amount: expense.amount,
        kind: TransactionKind::Expense,
        label: expense.category.clone(),
    }
}

/// Categories are matched byte for byte: no trimming, no case folding.
fn expenses_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.as_str()).or_default() += expense.amount;
    }

    totals
        .into_iter()
        .map(|(name, value)| CategoryTotal {
            name: name.to_string(),
            value,
        })
        .collect()
}
