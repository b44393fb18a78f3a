//! Application router configuration.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::{
    AppState,
    budget::{
        create_budget_endpoint, delete_budget_endpoint, edit_budget_endpoint,
        get_budget_endpoint, list_budgets_endpoint,
    },
    category::get_categories,
    dashboard::{get_budget_chart, get_category_chart, get_dashboard, get_monthly_chart},
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS,
            get(list_budgets_endpoint).post(create_budget_endpoint),
        )
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint)
                .put(edit_budget_endpoint)
                .delete(delete_budget_endpoint),
        )
        .route(endpoints::DASHBOARD, get(get_dashboard))
        .route(endpoints::CATEGORY_CHART, get(get_category_chart))
        .route(endpoints::MONTHLY_CHART, get(get_monthly_chart))
        .route(endpoints::BUDGET_CHART, get(get_budget_chart))
        .route(endpoints::CATEGORIES, get(get_categories))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

/// Check that the server is up.
async fn get_health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, build_router};

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open database.");
        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state.");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn health_check() {
        let server = get_test_server();

        let response = server.get("/api/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn budget_status_follows_spending() {
        let server = get_test_server();

        server
            .post("/api/transactions")
            .json(&json!({
                "amount": 50,
                "date": "2025-07-01",
                "description": "Groceries",
                "category": "Food",
                "type": "expense",
            }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/budgets")
            .json(&json!({ "category": "Food", "amount": 100, "month": "2025-07" }))
            .await
            .assert_status(StatusCode::CREATED);

        let chart = server
            .get("/api/charts/budgets")
            .add_query_param("month", "2025-07")
            .await
            .json::<Value>();
        assert_eq!(chart["rows"][0]["percentage"], json!(50.0));
        assert_eq!(chart["rows"][0]["status"], "under");

        server
            .post("/api/transactions")
            .json(&json!({
                "amount": 60,
                "date": "2025-07-15",
                "description": "Dinner out",
                "category": "Food",
                "type": "expense",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let chart = server
            .get("/api/charts/budgets")
            .add_query_param("month", "2025-07")
            .await
            .json::<Value>();
        assert_eq!(chart["rows"][0]["percentage"], json!(110.0));
        assert_eq!(chart["rows"][0]["status"], "over");
    }

    #[tokio::test]
    async fn deleted_transaction_is_not_listed() {
        let server = get_test_server();
        let created = server
            .post("/api/transactions")
            .json(&json!({
                "amount": 12.5,
                "date": "2025-07-01",
                "description": "Coffee",
                "category": "Food",
                "type": "expense",
            }))
            .await
            .json::<Value>();
        let id = created["id"].as_i64().unwrap();

        let response = server.delete(&format!("/api/transactions/{id}")).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Transaction deleted successfully" }));

        let transactions = server.get("/api/transactions").await.json::<Vec<Value>>();
        assert!(transactions.is_empty());
        server
            .delete(&format!("/api/transactions/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let server = get_test_server();
        let created = server
            .post("/api/transactions")
            .json(&json!({
                "amount": 12.5,
                "date": "2025-07-01",
                "description": "Coffee",
                "category": "Food",
                "type": "expense",
            }))
            .await
            .json::<Value>();
        let id = created["id"].as_i64().unwrap();

        let updated = server
            .put(&format!("/api/transactions/{id}"))
            .json(&json!({ "amount": 14 }))
            .await
            .json::<Value>();

        assert_eq!(updated["amount"], json!(14.0));
        assert_eq!(updated["description"], created["description"]);
        assert_eq!(updated["date"], created["date"]);
        assert_eq!(updated["type"], created["type"]);
        assert_eq!(updated["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn invalid_bodies_are_bad_requests() {
        let server = get_test_server();

        for body in [
            json!({
                "amount": "ten",
                "date": "2025-07-01",
                "description": "x",
                "category": "Food",
                "type": "expense",
            }),
            json!({
                "amount": 10,
                "date": "2025-07-01",
                "description": "x",
                "category": "Food",
                "type": "gift",
            }),
            json!({
                "amount": 10,
                "date": "July 1st",
                "description": "x",
                "category": "Food",
                "type": "expense",
            }),
            json!({
                "amount": 10,
                "date": "2025-07-01",
                "category": "Food",
                "type": "expense",
            }),
        ] {
            let response = server.post("/api/transactions").json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            assert!(response.json::<Value>()["error"].is_string(), "body {body}");
        }
    }

    #[tokio::test]
    async fn malformed_ids_are_bad_requests() {
        let server = get_test_server();

        for response in [
            server.get("/api/transactions/abc").await,
            server.put("/api/transactions/1.5").json(&json!({})).await,
            server.delete("/api/transactions/-").await,
            server.get("/api/budgets/xyz").await,
            server.put("/api/budgets/abc").json(&json!({})).await,
            server.delete("/api/budgets/xyz").await,
        ] {
            response.assert_status(StatusCode::BAD_REQUEST);
            let body = response.json::<Value>();
            assert!(body["error"].is_string(), "got {body}");
        }
    }

    #[tokio::test]
    async fn invalid_month_query_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get("/api/budgets")
            .add_query_param("month", "July")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn duplicate_budget_is_rejected() {
        let server = get_test_server();
        let budget = json!({ "category": "Travel", "amount": 300, "month": "2025-08" });

        server
            .post("/api/budgets")
            .json(&budget)
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/budgets")
            .json(&budget)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let budgets = server
            .get("/api/budgets")
            .add_query_param("month", "2025-08")
            .await
            .json::<Vec<Value>>();
        assert_eq!(budgets.len(), 1);
    }

    #[tokio::test]
    async fn dashboard_and_charts_respond() {
        let server = get_test_server();

        for path in [
            "/api/dashboard",
            "/api/charts/categories",
            "/api/charts/monthly",
            "/api/charts/budgets",
            "/api/categories",
        ] {
            server.get(path).await.assert_status_ok();
        }
    }
}
