//! Invoice API endpoints

use api_types::{
    Message,
    invoice::{
        InvoiceNew, InvoiceStatus, InvoiceUpdate, InvoiceView, LineItem, RecurringInterval,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Invoice, InvoicePatch, LineItems, NewInvoice};
use uuid::Uuid;

use crate::{ServerError, input, server::ServerState};

fn map_status(status: engine::InvoiceStatus) -> InvoiceStatus {
    match status {
        engine::InvoiceStatus::Pending => InvoiceStatus::Pending,
        engine::InvoiceStatus::Paid => InvoiceStatus::Paid,
        engine::InvoiceStatus::Overdue => InvoiceStatus::Overdue,
    }
}

fn map_interval(interval: engine::RecurringInterval) -> RecurringInterval {
    match interval {
        engine::RecurringInterval::Weekly => RecurringInterval::Weekly,
        engine::RecurringInterval::Monthly => RecurringInterval::Monthly,
        engine::RecurringInterval::Yearly => RecurringInterval::Yearly,
    }
}

fn map_items(items: LineItems) -> Option<Vec<LineItem>> {
    match items {
        LineItems::Legacy => None,
        LineItems::Items(items) => Some(
            items
                .into_iter()
                .map(|item| LineItem {
                    description: item.description,
                    quantity: item.quantity,
                    price: item.price.to_major(),
                })
                .collect(),
        ),
    }
}

fn map_invoice(invoice: Invoice) -> InvoiceView {
    InvoiceView {
        id: invoice.id,
        client_name: invoice.client_name,
        client_email: invoice.client_email,
        amount: invoice.amount.to_major(),
        status: map_status(invoice.status),
        date: invoice.date,
        due_date: invoice.due_date,
        is_recurring: invoice.recurrence.is_some(),
        recurring_interval: invoice.recurrence.map(map_interval),
        items: map_items(invoice.items),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<InvoiceView>>, ServerError> {
    let invoices = state.engine.list_invoices().await?;
    Ok(Json(invoices.into_iter().map(map_invoice).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceView>, ServerError> {
    let invoice = state.engine.invoice(id).await?;
    Ok(Json(map_invoice(invoice)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceNew>,
) -> Result<(StatusCode, Json<InvoiceView>), ServerError> {
    let items = payload.items.map(input::line_items).transpose()?;
    let new_invoice = NewInvoice {
        client_name: payload.client_name,
        client_email: payload.client_email,
        amount: input::money(payload.amount)?,
        status: payload.status.map(input::status),
        date: payload.date.map(|date| date.to_utc()),
        due_date: payload.due_date.map(|date| date.to_utc()),
        recurrence: input::recurrence(payload.is_recurring, payload.recurring_interval),
        items,
    };

    let invoice = state.engine.create_invoice(new_invoice).await?;
    tracing::debug!("created invoice {}", invoice.id);
    Ok((StatusCode::CREATED, Json(map_invoice(invoice))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoiceUpdate>,
) -> Result<Json<InvoiceView>, ServerError> {
    let patch = InvoicePatch {
        client_name: payload.client_name,
        client_email: payload.client_email,
        amount: payload.amount.map(input::money).transpose()?,
        status: payload.status.map(input::status),
        date: payload.date.map(|date| date.to_utc()),
        due_date: payload.due_date.map(|date| date.to_utc()),
        recurrence: input::recurrence_patch(payload.is_recurring, payload.recurring_interval),
        items: payload.items.map(input::line_items).transpose()?,
    };

    let invoice = state.engine.update_invoice(id, patch).await?;
    Ok(Json(map_invoice(invoice)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_invoice(id).await?;
    tracing::debug!("deleted invoice {id}");
    Ok(Json(Message {
        message: "Invoice deleted".to_string(),
    }))
}
