//! Store module
//!
//! Data access for the five SHG collections. Every call returns an owned
//! snapshot; callers keep it only for the request that asked for it.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::domain::{
    Goal, GoalDraft, GoalStatus, Member, MemberDraft, Product, ProductDraft, Transaction,
    TransactionDraft, Workshop, WorkshopDraft,
};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// The collections the store manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Members,
    Transactions,
    Goals,
    Workshops,
    Products,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Members,
        Collection::Transactions,
        Collection::Goals,
        Collection::Workshops,
        Collection::Products,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Members => "members",
            Collection::Transactions => "transactions",
            Collection::Goals => "goals",
            Collection::Workshops => "workshops",
            Collection::Products => "products",
        }
    }
}

/// Data access interface shared by the Postgres and in-memory backends.
///
/// Orderings are part of the contract:
/// members by `joined_date` desc, transactions by `transaction_date` desc,
/// goals by `created_at` desc, workshops by `date` asc, products by
/// `created_at` desc.
#[async_trait]
pub trait ShgStore: Send + Sync {
    async fn list_members(&self) -> StoreResult<Vec<Member>>;

    /// Transactions with the joined member name; `limit = None` returns all.
    async fn list_transactions(&self, limit: Option<i64>) -> StoreResult<Vec<Transaction>>;

    /// Goals, optionally only those with the given status.
    async fn list_goals(&self, status: Option<GoalStatus>) -> StoreResult<Vec<Goal>>;

    async fn list_workshops(&self) -> StoreResult<Vec<Workshop>>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Head-only row count.
    async fn count(&self, collection: Collection) -> StoreResult<i64>;

    async fn insert_member(&self, draft: MemberDraft) -> StoreResult<Member>;

    /// Fails with `StoreError::MemberNotFound` for an unknown member.
    async fn insert_transaction(&self, draft: TransactionDraft) -> StoreResult<Transaction>;

    async fn insert_goal(&self, draft: GoalDraft) -> StoreResult<Goal>;

    async fn insert_workshop(&self, draft: WorkshopDraft) -> StoreResult<Workshop>;

    async fn insert_product(&self, draft: ProductDraft) -> StoreResult<Product>;
}
