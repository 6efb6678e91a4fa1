use crate::{
    DashboardSnapshot, EngineError, Expense, Invoice, RecordStore, ResultEngine, load_snapshot,
};

use super::Engine;

/// Database failures on the read path surface as `DataUnavailable`; decoding
/// errors keep their own variant.
fn unavailable(err: EngineError) -> EngineError {
    match err {
        EngineError::Database(db_err) => EngineError::DataUnavailable(db_err.to_string()),
        other => other,
    }
}

impl RecordStore for Engine {
    async fn list_all_invoices(&self) -> ResultEngine<Vec<Invoice>> {
        self.list_invoices().await.map_err(unavailable)
    }

    async fn list_all_expenses(&self) -> ResultEngine<Vec<Expense>> {
        self.list_expenses().await.map_err(unavailable)
    }
}

impl Engine {
    /// Compute the dashboard from the records currently stored.
    pub async fn dashboard(&self) -> ResultEngine<DashboardSnapshot> {
        load_snapshot(self).await
    }
}
