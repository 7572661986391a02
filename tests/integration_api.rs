//! API Integration Tests
//!
//! Full router over the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Request, StatusCode};
use axum::body::Body;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use shg_dashboard::domain::{
    Goal, GoalDraft, GoalStatus, Member, MemberDraft, Product, ProductDraft, Transaction,
    TransactionDraft, Workshop, WorkshopDraft,
};
use shg_dashboard::store::{Collection, ShgStore, StoreError, StoreResult};

mod common;

use common::{body_json, decimal, get, post_json};

async fn create_member(app: &axum::Router, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/members",
            &json!({ "full_name": name, "phone": "9812345678", "village": "Rampur" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED, "member creation failed");
    body_json(response).await
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = common::memory_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_record_transaction_then_refetch() {
    let (app, _) = common::memory_app();

    let member = create_member(&app, "Sita Devi").await;
    assert_eq!(decimal(&member["total_savings"]), Decimal::ZERO);
    assert_eq!(member["status"], "active");
    let member_id = member["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/transactions",
            &json!({
                "member_id": member_id,
                "type": "savings",
                "amount": "500",
                "description": "  "
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["type"], "savings");
    assert_eq!(created["member_name"], "Sita Devi");
    assert!(created["description"].is_null());

    let response = app
        .clone()
        .oneshot(get("/api/v1/transactions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let transactions = body_json(response).await;
    let transactions = transactions.as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["id"], created["id"]);
    assert_eq!(decimal(&transactions[0]["amount"]), dec!(500));

    // Member totals are not touched by ledger inserts
    let response = app.oneshot(get("/api/v1/members")).await.unwrap();
    let members = body_json(response).await;
    assert_eq!(decimal(&members[0]["total_savings"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_transaction_for_unknown_member_writes_nothing() {
    let (app, _) = common::memory_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/transactions",
            &json!({
                "member_id": Uuid::new_v4().to_string(),
                "type": "fine",
                "amount": "50"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "member_not_found");

    let response = app.oneshot(get("/api/v1/transactions")).await.unwrap();
    let transactions = body_json(response).await;
    assert!(transactions.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_form_validation_errors() {
    let (app, _) = common::memory_app();
    let member = create_member(&app, "Asha").await;
    let member_id = member["id"].as_str().unwrap();

    let cases = [
        (
            "/api/v1/members",
            json!({ "full_name": "Rekha", "phone": "98", "village": " " }),
            "missing_field",
        ),
        (
            "/api/v1/transactions",
            json!({ "member_id": member_id, "type": "savings", "amount": "abc" }),
            "invalid_number",
        ),
        (
            "/api/v1/transactions",
            json!({ "member_id": member_id, "type": "savings", "amount": "-20" }),
            "invalid_amount",
        ),
        (
            "/api/v1/transactions",
            json!({ "member_id": member_id, "type": "bonus", "amount": "20" }),
            "invalid_transaction_type",
        ),
        (
            "/api/v1/goals",
            json!({ "title": "Hall", "target_amount": "" }),
            "missing_field",
        ),
        (
            "/api/v1/workshops",
            json!({ "title": "Tailoring", "date": "20/11/2026" }),
            "invalid_date",
        ),
        (
            "/api/v1/products",
            json!({ "name": "Pickle", "price": "120", "stock": "many" }),
            "invalid_number",
        ),
    ];

    for (uri, body, expected_code) in cases {
        let response = app.clone().oneshot(post_json(uri, &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} {body}");
        let error = body_json(response).await;
        assert_eq!(error["error_code"], expected_code, "{uri} {body}");
    }

    let response = app.oneshot(get("/api/v1/transactions")).await.unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_metrics_and_current_goal() {
    let (app, store) = common::memory_app();
    let now = Utc::now();

    store
        .seed_member(common::member("Sita", dec!(1000), dec!(1000)))
        .await;
    store
        .seed_member(common::member("Gita", dec!(500), Decimal::ZERO))
        .await;

    store
        .seed_goal(common::goal(
            "Older goal",
            dec!(5000),
            dec!(100),
            None,
            GoalStatus::Active,
            now - Duration::days(30),
        ))
        .await;
    store
        .seed_goal(common::goal(
            "Community hall",
            dec!(10000),
            dec!(2500),
            None,
            GoalStatus::Active,
            now - Duration::days(1),
        ))
        .await;
    store
        .seed_goal(common::goal(
            "Done already",
            dec!(100),
            dec!(100),
            None,
            GoalStatus::Achieved,
            now,
        ))
        .await;

    let response = app.oneshot(get("/api/v1/pages/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;

    let stats = &view["stats"];
    assert_eq!(decimal(&stats["total_savings"]), dec!(1500));
    assert_eq!(decimal(&stats["avg_savings"]), dec!(750));
    assert_eq!(stats["active_members"], 2);
    assert_eq!(stats["active_loans_count"], 1);
    assert_eq!(decimal(&stats["active_loan_amount"]), dec!(1000));

    assert_eq!(view["workshops"], 0);
    assert_eq!(view["products"], 0);

    let goal = &view["current_goal"];
    assert_eq!(goal["title"], "Community hall");
    assert_eq!(decimal(&goal["progress"]["progress_pct"]), dec!(25));
    assert_eq!(decimal(&goal["progress"]["remaining"]), dec!(7500));
    assert!(goal["progress"]["days_left"].is_null());
}

#[tokio::test]
async fn test_dashboard_shows_latest_transactions() {
    let (app, _) = common::memory_app();
    let member = create_member(&app, "Lakshmi").await;
    let member_id = member["id"].as_str().unwrap();

    for amount in ["10", "20", "30", "40", "50", "60"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/transactions",
                &json!({ "member_id": member_id, "type": "fine", "amount": amount }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/api/v1/pages/dashboard")).await.unwrap();
    let view = body_json(response).await;
    let recent = view["recent_transactions"].as_array().unwrap();
    assert_eq!(recent.len(), 4);
    assert_eq!(recent[0]["member_display_name"], "Lakshmi");
    assert_eq!(recent[0]["type_label"], "fine");
    assert_eq!(recent[0]["is_deduction"], true);
    assert!(view["current_goal"].is_null());

    let response = app
        .clone()
        .oneshot(get("/api/v1/transactions?limit=2"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = app
        .oneshot(get("/api/v1/transactions?limit=-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_goals_status_filter_and_page() {
    let (app, _) = common::memory_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/goals",
            &json!({ "title": "Well repair", "target_amount": "0" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let goal = body_json(response).await;
    assert_eq!(goal["status"], "active");
    assert_eq!(decimal(&goal["current_amount"]), Decimal::ZERO);

    let response = app
        .clone()
        .oneshot(get("/api/v1/goals?status=achieved"))
        .await
        .unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(get("/api/v1/goals?status=active"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    // Zero target has no percentage
    let response = app.oneshot(get("/api/v1/pages/goals")).await.unwrap();
    let view = body_json(response).await;
    assert!(view["goals"][0]["progress"]["progress_pct"].is_null());
}

#[tokio::test]
async fn test_workshop_and_product_counts() {
    let (app, _) = common::memory_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/workshops",
            &json!({ "title": "Bookkeeping", "date": "2026-11-20", "max_participants": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let workshop = body_json(response).await;
    assert_eq!(workshop["status"], "scheduled");
    assert_eq!(workshop["registered_count"], 0);
    assert!(workshop["max_participants"].is_null());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/products")
                .header("content-type", "application/json")
                .header("x-request-user-id", "550e8400-e29b-41d4-a716-446655440000")
                .body(Body::from(
                    json!({ "name": "Pickle jar", "price": "120.50", "stock": "40" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let product = body_json(response).await;
    assert_eq!(product["created_by"], "550e8400-e29b-41d4-a716-446655440000");

    let response = app
        .clone()
        .oneshot(get("/api/v1/workshops/count"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["count"], 1);

    let response = app.oneshot(get("/api/v1/products/count")).await.unwrap();
    assert_eq!(body_json(response).await["count"], 1);
}

#[tokio::test]
async fn test_invalid_user_header_rejected() {
    let (app, _) = common::memory_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/members")
                .header("x-request-user-id", "not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], "invalid_user_id");
}

#[tokio::test]
async fn test_shell_resolution() {
    let (app, _) = common::memory_app();

    let response = app
        .clone()
        .oneshot(get("/api/v1/shell?path=/members"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let route = body_json(response).await;
    assert_eq!(route["page"], "members");
    assert_eq!(route["with_header"], true);
    assert_eq!(route["nav"].as_array().unwrap().len(), 6);
    assert_eq!(route["data_endpoint"], "/api/v1/pages/members");

    let response = app
        .clone()
        .oneshot(get("/api/v1/shell?path=/auth"))
        .await
        .unwrap();
    let route = body_json(response).await;
    assert_eq!(route["page"], "auth");
    assert_eq!(route["with_header"], false);

    let response = app
        .oneshot(get("/api/v1/shell?path=/unknown"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["page"], "not_found");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let (app, _) = common::memory_app();

    let response = app.oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_code"], "not_found");
}

// =========================================================================
// Store failures
// =========================================================================

/// Store where every read fails except the member list
struct FailingStore {
    members: Vec<Member>,
}

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ShgStore for FailingStore {
    async fn list_members(&self) -> StoreResult<Vec<Member>> {
        Ok(self.members.clone())
    }

    async fn list_transactions(&self, _limit: Option<i64>) -> StoreResult<Vec<Transaction>> {
        unavailable()
    }

    async fn list_goals(&self, _status: Option<GoalStatus>) -> StoreResult<Vec<Goal>> {
        unavailable()
    }

    async fn list_workshops(&self) -> StoreResult<Vec<Workshop>> {
        unavailable()
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        unavailable()
    }

    async fn count(&self, _collection: Collection) -> StoreResult<i64> {
        unavailable()
    }

    async fn insert_member(&self, _draft: MemberDraft) -> StoreResult<Member> {
        unavailable()
    }

    async fn insert_transaction(&self, _draft: TransactionDraft) -> StoreResult<Transaction> {
        unavailable()
    }

    async fn insert_goal(&self, _draft: GoalDraft) -> StoreResult<Goal> {
        unavailable()
    }

    async fn insert_workshop(&self, _draft: WorkshopDraft) -> StoreResult<Workshop> {
        unavailable()
    }

    async fn insert_product(&self, _draft: ProductDraft) -> StoreResult<Product> {
        unavailable()
    }
}

#[tokio::test]
async fn test_dashboard_tolerates_failing_sections() {
    let store = Arc::new(FailingStore {
        members: vec![common::member("Sita", dec!(200), Decimal::ZERO)],
    });
    let app = common::app_with_store(store);

    let response = app.clone().oneshot(get("/api/v1/pages/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(decimal(&view["stats"]["total_savings"]), dec!(200));
    assert_eq!(view["workshops"], 0);
    assert!(view["current_goal"].is_null());
    assert!(view["recent_transactions"].as_array().unwrap().is_empty());

    // List pages fail as a whole
    let response = app.oneshot(get("/api/v1/pages/financial")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = body_json(response).await;
    assert_eq!(error["error_code"], "database_error");
    assert_eq!(error["error"], "Internal server error");
}

// =========================================================================
// Request body and header edge cases
// =========================================================================

#[tokio::test]
async fn test_absent_required_fields_are_missing_field() {
    let (app, _) = common::memory_app();

    let cases = [
        ("/api/v1/products", json!({ "name": "Pickle", "price": "120" }), "stock"),
        ("/api/v1/members", json!({ "full_name": "Rekha", "village": "Rampur" }), "phone"),
        ("/api/v1/goals", json!({ "title": "Hall" }), "target_amount"),
    ];

    for (uri, body, field) in cases {
        let response = app.clone().oneshot(post_json(uri, &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} {body}");
        let error = body_json(response).await;
        assert_eq!(error["error_code"], "missing_field", "{uri} {body}");
        assert_eq!(error["details"], field, "{uri} {body}");
    }

    let response = app.oneshot(get("/api/v1/products/count")).await.unwrap();
    assert_eq!(body_json(response).await["count"], 0);
}

#[tokio::test]
async fn test_unreadable_body_is_json_invalid_request() {
    let (app, _) = common::memory_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/members")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], "invalid_request");
}

#[tokio::test]
async fn test_amount_at_one_trillion_rejected() {
    let (app, _) = common::memory_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/goals",
            &json!({ "title": "Dam", "target_amount": "1000000000000" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], "invalid_amount");

    let response = app
        .oneshot(post_json(
            "/api/v1/goals",
            &json!({ "title": "Dam", "target_amount": "999999999999.99" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_member_id_is_bad_request() {
    let (app, _) = common::memory_app();

    let response = app
        .oneshot(post_json(
            "/api/v1/transactions",
            &json!({ "member_id": "member-7", "type": "savings", "amount": "10" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error_code"], "invalid_id");
    assert_eq!(error["details"], "member_id");
}

#[tokio::test]
async fn test_request_id_is_always_a_uuid() {
    let (app, _) = common::memory_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/members")
                .header("x-request-id", "client-abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let echoed = response.headers()["x-request-id"].to_str().unwrap();
    assert!(Uuid::parse_str(echoed).is_ok(), "got {echoed}");

    let id = Uuid::new_v4();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/members")
                .header("x-request-id", id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()["x-request-id"].to_str().unwrap(),
        id.to_string()
    );
}
