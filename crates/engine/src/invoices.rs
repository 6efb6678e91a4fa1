//! Invoice primitives.
//!
//! An `Invoice` is billed work. It only counts as income once its status is
//! [`InvoiceStatus::Paid`]; `amount` is always the authoritative total and the
//! line items are informational.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{parse_stored_amount, parse_stored_uuid},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
        }
    }
}

impl TryFrom<&str> for InvoiceStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "OVERDUE" => Ok(Self::Overdue),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid invoice status: {other}"
            ))),
        }
    }
}

/// How often a recurring invoice is billed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurringInterval {
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringInterval {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl TryFrom<&str> for RecurringInterval {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid recurring interval: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    #[serde(rename = "price_minor")]
    pub price: Money,
}

impl LineItem {
    /// `quantity × price`, `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }
}

/// Line items of an invoice.
///
/// Invoices created before line items existed have no `items` column value;
/// they are kept apart from an invoice that simply has an empty list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LineItems {
    #[default]
    Legacy,
    Items(Vec<LineItem>),
}

impl LineItems {
    pub fn as_slice(&self) -> &[LineItem] {
        match self {
            Self::Legacy => &[],
            Self::Items(items) => items,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }

    fn to_column(&self) -> ResultEngine<Option<String>> {
        match self {
            Self::Legacy => Ok(None),
            Self::Items(items) => serde_json::to_string(items)
                .map(Some)
                .map_err(|err| EngineError::InvalidRecord(format!("invoice items: {err}"))),
        }
    }

    fn from_column(value: Option<&str>) -> ResultEngine<Self> {
        match value {
            None => Ok(Self::Legacy),
            Some(raw) => serde_json::from_str::<Option<Vec<LineItem>>>(raw)
                .map(|items| items.map_or(Self::Legacy, Self::Items))
                .map_err(|err| EngineError::InvalidRecord(format!("invoice items: {err}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: Option<String>,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    /// `None` for one-off invoices.
    pub recurrence: Option<RecurringInterval>,
    pub items: LineItems,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Sum of `quantity × price` over the line items.
    ///
    /// Returns `None` for legacy invoices and on overflow. The result may
    /// disagree with `amount`, which stays authoritative.
    pub fn line_items_total(&self) -> Option<Money> {
        match &self.items {
            LineItems::Legacy => None,
            LineItems::Items(items) => items
                .iter()
                .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.total()?)),
        }
    }
}

/// Input for [`Engine::create_invoice`](crate::Engine::create_invoice).
#[derive(Clone, Debug, Default)]
pub struct NewInvoice {
    pub client_name: String,
    pub client_email: Option<String>,
    pub amount: Money,
    /// Defaults to `PENDING`.
    pub status: Option<InvoiceStatus>,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub recurrence: Option<RecurringInterval>,
    /// `None` stores a legacy (item-less) invoice.
    pub items: Option<Vec<LineItem>>,
}

/// Partial update for [`Engine::update_invoice`](crate::Engine::update_invoice).
///
/// `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct InvoicePatch {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub amount: Option<Money>,
    pub status: Option<InvoiceStatus>,
    pub date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    /// `Some(None)` turns a recurring invoice into a one-off.
    pub recurrence: Option<Option<RecurringInterval>>,
    pub items: Option<Vec<LineItem>>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub amount_minor: i64,
    pub status: String,
    pub date: DateTimeUtc,
    pub due_date: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub items: Option<String>,
    pub recurring_interval: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Invoice> for ActiveModel {
    type Error = EngineError;

    fn try_from(invoice: &Invoice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActiveValue::Set(invoice.id.to_string()),
            client_name: ActiveValue::Set(invoice.client_name.clone()),
            client_email: ActiveValue::Set(invoice.client_email.clone()),
            amount_minor: ActiveValue::Set(invoice.amount.cents()),
            status: ActiveValue::Set(invoice.status.as_str().to_string()),
            date: ActiveValue::Set(invoice.date),
            due_date: ActiveValue::Set(invoice.due_date),
            items: ActiveValue::Set(invoice.items.to_column()?),
            recurring_interval: ActiveValue::Set(
                invoice.recurrence.map(|interval| interval.as_str().to_string()),
            ),
        })
    }
}

impl TryFrom<Model> for Invoice {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_stored_uuid(&model.id, "invoice")?,
            client_name: model.client_name,
            client_email: model.client_email,
            amount: parse_stored_amount(model.amount_minor, "invoice amount")?,
            status: InvoiceStatus::try_from(model.status.as_str())?,
            date: model.date,
            due_date: model.due_date,
            recurrence: model
                .recurring_interval
                .as_deref()
                .map(RecurringInterval::try_from)
                .transpose()?,
            items: LineItems::from_column(model.items.as_deref())?,
        })
    }
}
