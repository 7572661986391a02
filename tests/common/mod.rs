//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use shg_dashboard::api::{build_app, AppState};
use shg_dashboard::domain::{Goal, GoalStatus, Member};
use shg_dashboard::views::ViewSettings;
use shg_dashboard::{MemoryStore, ShgStore};

/// App over a fresh in-memory store; the store is returned for seeding.
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = app_with_store(store.clone());
    (app, store)
}

pub fn app_with_store(store: Arc<dyn ShgStore>) -> Router {
    build_app(AppState::new(store, ViewSettings::default()))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Decimal fields serialize as strings
pub fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
        .parse()
        .unwrap()
}

pub fn member(name: &str, savings: Decimal, loans: Decimal) -> Member {
    Member {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        phone: "9800000000".to_string(),
        village: "Rampur".to_string(),
        total_savings: savings,
        active_loans: loans,
        joined_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        status: "active".to_string(),
    }
}

pub fn goal(
    title: &str,
    target: Decimal,
    current: Decimal,
    deadline: Option<NaiveDate>,
    status: GoalStatus,
    created_at: DateTime<Utc>,
) -> Goal {
    Goal {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        target_amount: target,
        current_amount: current,
        deadline,
        status,
        created_at,
    }
}
