//! Expense API endpoints

use api_types::{
    Message,
    expense::{ExpenseNew, ExpenseView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Expense, NewExpense};
use uuid::Uuid;

use crate::{ServerError, input, server::ServerState};

fn map_expense(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        category: expense.category,
        amount: expense.amount.to_major(),
        date: expense.date,
        description: expense.description,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.list_expenses().await?;
    Ok(Json(expenses.into_iter().map(map_expense).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let new_expense = NewExpense {
        category: payload.category,
        amount: input::money(payload.amount)?,
        date: payload.date.map(|date| date.to_utc()),
        description: payload.description,
    };

    let expense = state.engine.create_expense(new_expense).await?;
    tracing::debug!("created expense {}", expense.id);
    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_expense(id).await?;
    tracing::debug!("deleted expense {id}");
    Ok(Json(Message {
        message: "Expense deleted".to_string(),
    }))
}
