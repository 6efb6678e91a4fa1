//! Dashboard API endpoint

use api_types::dashboard::{ChartSlice, DashboardStats, RecentTransaction, TransactionKind};
use axum::{Json, extract::State};
use engine::DashboardSnapshot;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> TransactionKind {
    match kind {
        engine::TransactionKind::Income => TransactionKind::Income,
        engine::TransactionKind::Expense => TransactionKind::Expense,
    }
}

fn map_snapshot(snapshot: DashboardSnapshot) -> DashboardStats {
    DashboardStats {
        total_income: snapshot.total_income.to_major(),
        total_expenses: snapshot.total_expenses.to_major(),
        balance: snapshot.balance.to_major(),
        recent_transactions: snapshot
            .recent_transactions
            .into_iter()
            .map(|tx| RecentTransaction {
                id: tx.id,
                date: tx.date,
                amount: tx.amount.to_major(),
                kind: map_kind(tx.kind),
                description: tx.label,
            })
            .collect(),
        expense_chart_data: snapshot
            .expenses_by_category
            .into_iter()
            .map(|category| ChartSlice {
                name: category.name,
                value: category.value.to_major(),
            })
            .collect(),
    }
}

/// Handle requests for the dashboard summary.
pub async fn get_stats(State(state): State<ServerState>) -> Result<Json<DashboardStats>, ServerError> {
    let snapshot = state.engine.dashboard().await.map_err(|err| {
        tracing::error!("Error fetching dashboard stats: {err}");
        ServerError::Internal("Failed to fetch dashboard stats")
    })?;

    Ok(Json(map_snapshot(snapshot)))
}
