//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, FromRequest, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{Goal, GoalStatus, Member, OperationContext, Product, Transaction, Workshop};
use crate::error::AppError;
use crate::handlers::{
    CreateGoalCommand, CreateMemberCommand, CreateProductCommand, InsertHandler,
    RecordTransactionCommand, ScheduleWorkshopCommand,
};
use crate::store::Collection;
use crate::views::{
    DashboardView, FinancialView, GoalsView, MembersView, ProductsView, WorkshopsView,
};

use super::shell::{self, ResolvedRoute};
use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GoalsQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShellQuery {
    #[serde(default)]
    pub path: Option<String>,
}

/// JSON body extractor whose rejection renders as an `AppError`
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct FormJson<T>(pub T);

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Collections
        .route("/members", get(list_members).post(create_member))
        .route("/transactions", get(list_transactions).post(record_transaction))
        .route("/goals", get(list_goals).post(create_goal))
        .route("/workshops", get(list_workshops).post(schedule_workshop))
        .route("/workshops/count", get(count_workshops))
        .route("/products", get(list_products).post(create_product))
        .route("/products/count", get(count_products))
        // Page views
        .route("/pages/dashboard", get(dashboard_page))
        .route("/pages/members", get(members_page))
        .route("/pages/financial", get(financial_page))
        .route("/pages/goals", get(goals_page))
        .route("/pages/workshops", get(workshops_page))
        .route("/pages/products", get(products_page))
        // Navigation shell
        .route("/shell", get(resolve_shell))
}

// =========================================================================
// Members
// =========================================================================

async fn list_members(State(state): State<AppState>) -> Result<Json<Vec<Member>>, AppError> {
    Ok(Json(state.store.list_members().await?))
}

async fn create_member(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    FormJson(command): FormJson<CreateMemberCommand>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    let member = InsertHandler::new(state.store)
        .create_member(command, &context)
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

// =========================================================================
// Transactions
// =========================================================================

async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    if query.limit.is_some_and(|limit| limit < 0) {
        return Err(AppError::InvalidRequest("limit must not be negative".to_string()));
    }

    Ok(Json(state.store.list_transactions(query.limit).await?))
}

async fn record_transaction(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    FormJson(command): FormJson<RecordTransactionCommand>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let transaction = InsertHandler::new(state.store)
        .record_transaction(command, &context)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// =========================================================================
// Goals
// =========================================================================

async fn list_goals(
    State(state): State<AppState>,
    Query(query): Query<GoalsQuery>,
) -> Result<Json<Vec<Goal>>, AppError> {
    let status = query
        .status
        .filter(|s| !s.trim().is_empty())
        .map(GoalStatus::from);

    Ok(Json(state.store.list_goals(status).await?))
}

async fn create_goal(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    FormJson(command): FormJson<CreateGoalCommand>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    let goal = InsertHandler::new(state.store)
        .create_goal(command, &context)
        .await?;

    Ok((StatusCode::CREATED, Json(goal)))
}

// =========================================================================
// Workshops
// =========================================================================

async fn list_workshops(State(state): State<AppState>) -> Result<Json<Vec<Workshop>>, AppError> {
    Ok(Json(state.store.list_workshops().await?))
}

async fn count_workshops(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let count = state.store.count(Collection::Workshops).await?;
    Ok(Json(CountResponse { count }))
}

async fn schedule_workshop(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    FormJson(command): FormJson<ScheduleWorkshopCommand>,
) -> Result<(StatusCode, Json<Workshop>), AppError> {
    let workshop = InsertHandler::new(state.store)
        .schedule_workshop(command, &context)
        .await?;

    Ok((StatusCode::CREATED, Json(workshop)))
}

// =========================================================================
// Products
// =========================================================================

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.store.list_products().await?))
}

async fn count_products(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let count = state.store.count(Collection::Products).await?;
    Ok(Json(CountResponse { count }))
}

async fn create_product(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    FormJson(command): FormJson<CreateProductCommand>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = InsertHandler::new(state.store)
        .create_product(command, &context)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// =========================================================================
// Page views
// =========================================================================

async fn dashboard_page(State(state): State<AppState>) -> Json<DashboardView> {
    Json(DashboardView::load(state.store.as_ref(), state.settings, Utc::now()).await)
}

async fn members_page(State(state): State<AppState>) -> Result<Json<MembersView>, AppError> {
    Ok(Json(MembersView::load(state.store.as_ref()).await?))
}

async fn financial_page(State(state): State<AppState>) -> Result<Json<FinancialView>, AppError> {
    Ok(Json(FinancialView::load(state.store.as_ref()).await?))
}

async fn goals_page(State(state): State<AppState>) -> Result<Json<GoalsView>, AppError> {
    Ok(Json(GoalsView::load(state.store.as_ref(), Utc::now()).await?))
}

async fn workshops_page(State(state): State<AppState>) -> Result<Json<WorkshopsView>, AppError> {
    Ok(Json(WorkshopsView::load(state.store.as_ref()).await?))
}

async fn products_page(State(state): State<AppState>) -> Result<Json<ProductsView>, AppError> {
    Ok(Json(ProductsView::load(state.store.as_ref()).await?))
}

// =========================================================================
// Navigation shell
// =========================================================================

async fn resolve_shell(Query(query): Query<ShellQuery>) -> Json<ResolvedRoute> {
    Json(shell::resolve(query.path.as_deref().unwrap_or("/")))
}
