use chrono::Utc;
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Invoice, InvoicePatch, LineItem, LineItems, NewInvoice, ResultEngine, invoices,
    util::{ensure_record_amount, ensure_required_name, normalize_optional_text},
};

use super::{Engine, with_tx};

impl Engine {
    /// Return every invoice, newest first.
    pub async fn list_invoices(&self) -> ResultEngine<Vec<Invoice>> {
        invoices::Entity::find()
            .order_by_desc(invoices::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Invoice::try_from)
            .collect()
    }

    /// Return a single invoice.
    pub async fn invoice(&self, id: Uuid) -> ResultEngine<Invoice> {
        let model = invoices::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("invoice {id}")))?;
        Invoice::try_from(model)
    }

    /// Store a new invoice.
    ///
    /// - `status` defaults to `PENDING` and `date` to now.
    /// - `items: None` stores a legacy invoice without line items.
    /// - `amount` is stored as given; it is not recomputed from the items.
    pub async fn create_invoice(&self, input: NewInvoice) -> ResultEngine<Invoice> {
        let client_name = ensure_required_name(&input.client_name, "client name")?;
        ensure_record_amount(input.amount, "amount")?;
        let items = match input.items {
            Some(items) => LineItems::Items(validate_items(items)?),
            None => LineItems::Legacy,
        };

        let invoice = Invoice {
            id: Uuid::new_v4(),
            client_name,
            client_email: normalize_optional_text(input.client_email.as_deref()),
            amount: input.amount,
            status: input.status.unwrap_or_default(),
            date: input.date.unwrap_or_else(Utc::now),
            due_date: input.due_date,
            recurrence: input.recurrence,
            items,
        };

        invoices::ActiveModel::try_from(&invoice)?
            .insert(&self.database)
            .await?;
        Ok(invoice)
    }

    /// Apply a partial update to an invoice and return the stored result.
    pub async fn update_invoice(&self, id: Uuid, patch: InvoicePatch) -> ResultEngine<Invoice> {
        with_tx!(self, |db_tx| {
            let model = invoices::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("invoice {id}")))?;

            let mut invoice = Invoice::try_from(model)?;
            apply_patch(&mut invoice, patch)?;

            invoices::ActiveModel::try_from(&invoice)?
                .update(&db_tx)
                .await?;
            Ok(invoice)
        })
    }

    /// Remove an invoice.
    pub async fn delete_invoice(&self, id: Uuid) -> ResultEngine<()> {
        let result = invoices::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("invoice {id}")));
        }
        Ok(())
    }
}

fn apply_patch(invoice: &mut Invoice, patch: InvoicePatch) -> ResultEngine<()> {
    if let Some(name) = patch.client_name {
        invoice.client_name = ensure_required_name(&name, "client name")?;
    }
    if let Some(email) = patch.client_email {
        invoice.client_email = normalize_optional_text(Some(&email));
    }
    if let Some(amount) = patch.amount {
        ensure_record_amount(amount, "amount")?;
        invoice.amount = amount;
    }
    if let Some(status) = patch.status {
        invoice.status = status;
    }
    if let Some(date) = patch.date {
        invoice.date = date;
    }
    if let Some(due_date) = patch.due_date {
        invoice.due_date = Some(due_date);
    }
    if let Some(recurrence) = patch.recurrence {
        invoice.recurrence = recurrence;
    }
    if let Some(items) = patch.items {
        invoice.items = LineItems::Items(validate_items(items)?);
    }
    Ok(())
}

fn validate_items(items: Vec<LineItem>) -> ResultEngine<Vec<LineItem>> {
    items
        .into_iter()
        .map(|item| -> ResultEngine<LineItem> {
            ensure_record_amount(item.price, "line item price")?;
            Ok(LineItem {
                description: item.description.trim().to_string(),
                ..item
            })
        })
        .collect()
}
