//! JSON request and response bodies of the finance tracker API.
//!
//! Field names are camelCase. Amounts are decimal numbers in major units
//! (`12.5` is twelve and a half); inputs also accept decimal strings.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An amount as sent by a client: a JSON number or a decimal string
/// (`"12.50"`, `"12,5"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

/// A date as sent by a client: either an RFC3339 timestamp or a plain
/// `YYYY-MM-DD` date, which is read as midnight UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
}

impl DateInput {
    pub fn to_utc(self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => dt.with_timezone(&Utc),
            Self::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

/// Body of successful delete calls.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub mod dashboard {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// One row of the recent-activity table.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecentTransaction {
        pub id: Uuid,
        pub date: DateTime<Utc>,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// `Invoice for {clientName}` or the expense category.
        pub description: String,
    }

    /// One slice of the expense pie chart.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChartSlice {
        pub name: String,
        pub value: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DashboardStats {
        pub total_income: f64,
        pub total_expenses: f64,
        pub balance: f64,
        pub recent_transactions: Vec<RecentTransaction>,
        pub expense_chart_data: Vec<ChartSlice>,
    }
}

pub mod invoice {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum InvoiceStatus {
        Pending,
        Paid,
        Overdue,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum RecurringInterval {
        Weekly,
        Monthly,
        Yearly,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct LineItem {
        pub description: String,
        pub quantity: u32,
        /// Unit price.
        pub price: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvoiceView {
        pub id: Uuid,
        pub client_name: String,
        pub client_email: Option<String>,
        pub amount: f64,
        pub status: InvoiceStatus,
        pub date: DateTime<Utc>,
        pub due_date: Option<DateTime<Utc>>,
        pub is_recurring: bool,
        pub recurring_interval: Option<RecurringInterval>,
        /// `None` for invoices created before line items existed.
        pub items: Option<Vec<LineItem>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvoiceNew {
        pub client_name: String,
        pub client_email: Option<String>,
        pub amount: Amount,
        /// Defaults to `PENDING`.
        pub status: Option<InvoiceStatus>,
        /// Defaults to now.
        pub date: Option<DateInput>,
        pub due_date: Option<DateInput>,
        pub is_recurring: Option<bool>,
        /// Used when `isRecurring` is true; defaults to `MONTHLY`.
        pub recurring_interval: Option<RecurringInterval>,
        pub items: Option<Vec<LineItem>>,
    }

    /// Partial update: absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvoiceUpdate {
        pub client_name: Option<String>,
        pub client_email: Option<String>,
        pub amount: Option<Amount>,
        pub status: Option<InvoiceStatus>,
        pub date: Option<DateInput>,
        pub due_date: Option<DateInput>,
        pub is_recurring: Option<bool>,
        pub recurring_interval: Option<RecurringInterval>,
        pub items: Option<Vec<LineItem>>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub category: String,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub category: String,
        pub amount: Amount,
        /// Defaults to now.
        pub date: Option<DateInput>,
        pub description: Option<String>,
    }
}
