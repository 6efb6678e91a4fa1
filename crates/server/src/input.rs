//! Conversions from wire input into engine values.

use api_types::{
    Amount,
    invoice::{InvoiceStatus, LineItem, RecurringInterval},
};
use engine::Money;

use crate::ServerError;

pub(crate) fn money(amount: Amount) -> Result<Money, ServerError> {
    let money = match amount {
        Amount::Number(value) => Money::from_major(value)?,
        Amount::Text(raw) => raw.parse::<Money>()?,
    };
    Ok(money)
}

pub(crate) fn status(status: InvoiceStatus) -> engine::InvoiceStatus {
    match status {
        InvoiceStatus::Pending => engine::InvoiceStatus::Pending,
        InvoiceStatus::Paid => engine::InvoiceStatus::Paid,
        InvoiceStatus::Overdue => engine::InvoiceStatus::Overdue,
    }
}

pub(crate) fn interval(interval: RecurringInterval) -> engine::RecurringInterval {
    match interval {
        RecurringInterval::Weekly => engine::RecurringInterval::Weekly,
        RecurringInterval::Monthly => engine::RecurringInterval::Monthly,
        RecurringInterval::Yearly => engine::RecurringInterval::Yearly,
    }
}

/// Recurrence of a new invoice: the interval only applies when the invoice is
/// flagged recurring, and defaults to monthly.
pub(crate) fn recurrence(
    is_recurring: Option<bool>,
    recurring_interval: Option<RecurringInterval>,
) -> Option<engine::RecurringInterval> {
    match is_recurring {
        Some(true) => Some(interval(
            recurring_interval.unwrap_or(RecurringInterval::Monthly),
        )),
        _ => None,
    }
}

/// Recurrence change of an updated invoice. Without the flag the stored
/// value is kept.
pub(crate) fn recurrence_patch(
    is_recurring: Option<bool>,
    recurring_interval: Option<RecurringInterval>,
) -> Option<Option<engine::RecurringInterval>> {
    is_recurring.map(|flag| recurrence(Some(flag), recurring_interval))
}

pub(crate) fn line_items(items: Vec<LineItem>) -> Result<Vec<engine::LineItem>, ServerError> {
    items
        .into_iter()
        .map(|item| -> Result<engine::LineItem, ServerError> {
            Ok(engine::LineItem {
                description: item.description,
                quantity: item.quantity,
                price: Money::from_major(item.price)?,
            })
        })
        .collect()
}
