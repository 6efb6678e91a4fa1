use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;

async fn app_with_db() -> (Router, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (server::app(engine), db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

#[tokio::test]
async fn root_reports_running() {
    let (app, _db) = app_with_db().await;
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Finance Tracker API is running"));
}

#[tokio::test]
async fn empty_dashboard() {
    let (app, _db) = app_with_db().await;
    let (status, body) = send(&app, "GET", "/api/dashboard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalIncome"].as_f64(), Some(0.0));
    assert_eq!(body["totalExpenses"].as_f64(), Some(0.0));
    assert_eq!(body["balance"].as_f64(), Some(0.0));
    assert_eq!(body["recentTransactions"], json!([]));
    assert_eq!(body["expenseChartData"], json!([]));
}

#[tokio::test]
async fn dashboard_over_created_records() {
    let (app, _db) = app_with_db().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/invoices",
        Some(json!({
            "clientName": "Acme",
            "amount": 1000,
            "status": "PAID",
            "date": "2024-01-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    send(
        &app,
        "POST",
        "/api/invoices",
        Some(json!({
            "clientName": "Globex",
            "amount": "500",
            "status": "PENDING",
            "date": "2024-01-06"
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({ "category": "Office", "amount": 200, "date": "2024-01-07" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalIncome"].as_f64(), Some(1000.0));
    assert_eq!(body["totalExpenses"].as_f64(), Some(200.0));
    assert_eq!(body["balance"].as_f64(), Some(800.0));

    let recent = body["recentTransactions"].as_array().unwrap();
    let labels: Vec<_> = recent
        .iter()
        .map(|tx| (tx["type"].as_str().unwrap(), tx["description"].as_str().unwrap()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("EXPENSE", "Office"),
            ("INCOME", "Invoice for Globex"),
            ("INCOME", "Invoice for Acme"),
        ]
    );

    assert_eq!(
        body["expenseChartData"],
        json!([{ "name": "Office", "value": 200.0 }])
    );
}

#[tokio::test]
async fn invoice_lifecycle() {
    let (app, _db) = app_with_db().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/invoices",
        Some(json!({
            "clientName": "Acme",
            "clientEmail": "billing@acme.test",
            "amount": "150,50",
            "isRecurring": true,
            "items": [{ "description": "Design", "quantity": 2, "price": 75.25 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["amount"].as_f64(), Some(150.5));
    assert_eq!(created["isRecurring"], true);
    assert_eq!(created["recurringInterval"], "MONTHLY");
    assert_eq!(created["items"][0]["quantity"], 2);

    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/api/invoices/{id}");

    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["clientName"], "Acme");

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "status": "PAID", "isRecurring": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "PAID");
    assert_eq!(updated["isRecurring"], false);
    assert_eq!(updated["recurringInterval"], Value::Null);
    assert_eq!(updated["clientEmail"], "billing@acme.test");

    let (status, listed) = send(&app, "GET", "/api/invoices", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Invoice deleted" }));

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn invoice_without_items_is_legacy() {
    let (app, _db) = app_with_db().await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/invoices",
        Some(json!({ "clientName": "Acme", "amount": 10 })),
    )
    .await;
    assert_eq!(created["items"], Value::Null);
    assert_eq!(created["isRecurring"], false);
}

#[tokio::test]
async fn expense_lifecycle() {
    let (app, _db) = app_with_db().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({ "category": "Travel", "amount": 42.1, "description": "Train" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["amount"].as_f64(), Some(42.1));

    let (status, listed) = send(&app, "GET", "/api/expenses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["category"], "Travel");

    let uri = format!("/api/expenses/{}", created["id"].as_str().unwrap());
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Expense deleted" }));

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let (app, _db) = app_with_db().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({ "category": "Office", "amount": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        "POST",
        "/api/invoices",
        Some(json!({ "clientName": "Acme", "amount": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/api/invoices",
        Some(json!({ "clientName": "   ", "amount": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/api/invoices/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_failure_is_reported() {
    let (app, db) = app_with_db().await;
    db.execute_unprepared("DROP TABLE expenses").await.unwrap();

    let (status, body) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch dashboard stats" }));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let (app, _db) = app_with_db().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/dashboard")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/invoices")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn oversized_amounts_are_rejected() {
    let (app, _db) = app_with_db().await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            "POST",
            "/api/invoices",
            Some(json!({ "clientName": "Acme", "amount": 5e16, "status": "PAID" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    let (status, body) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalIncome"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn categories_are_stored_as_sent() {
    let (app, _db) = app_with_db().await;
    send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({ "category": "Travel", "amount": 50 })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({ "category": "Travel ", "amount": 75 })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(
        body["expenseChartData"],
        json!([
            { "name": "Travel", "value": 50.0 },
            { "name": "Travel ", "value": 75.0 }
        ])
    );
}
