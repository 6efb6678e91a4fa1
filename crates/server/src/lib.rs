use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, app, run, run_with_listener, spawn_with_listener};

mod dashboard;
mod expenses;
mod input;
mod invoices;
mod server;

pub mod types {
    pub mod dashboard {
        pub use api_types::dashboard::{
            ChartSlice, DashboardStats, RecentTransaction, TransactionKind,
        };
    }

    pub mod invoice {
        pub use api_types::invoice::{
            InvoiceNew, InvoiceStatus, InvoiceUpdate, InvoiceView, LineItem, RecurringInterval,
        };
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseView};
    }

    pub use api_types::{Amount, DateInput, Message};
}

pub enum ServerError {
    Engine(EngineError),
    /// A failure whose details are logged at the call site; only the fixed
    /// message reaches the client.
    Internal(&'static str),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidId(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidName(_) | EngineError::InvalidAmount(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EngineError::InvalidRecord(_)
        | EngineError::DataUnavailable(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::InvalidRecord(detail) | EngineError::DataUnavailable(detail) => {
            tracing::error!("record store error: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let res = ServerError::from(EngineError::InvalidName("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_invalid_id_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidId("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_500() {
        let res =
            ServerError::from(EngineError::DataUnavailable("down".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = ServerError::from(EngineError::InvalidRecord("bad".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_maps_to_500() {
        let res = ServerError::Internal("Failed to fetch dashboard stats").into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
