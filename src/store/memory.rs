//! In-memory store
//!
//! Keeps the collections in process memory. Used for local development
//! (`STORE_BACKEND=memory`) and by the HTTP tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    Goal, GoalDraft, GoalStatus, Member, MemberDraft, Product, ProductDraft, Transaction,
    TransactionDraft, TransactionType, Workshop, WorkshopDraft, WorkshopStatus,
};

use super::{Collection, ShgStore, StoreError, StoreResult};

/// Transactions are stored without the member name; it is joined on read.
#[derive(Debug, Clone)]
struct TransactionRecord {
    id: Uuid,
    member_id: Uuid,
    kind: TransactionType,
    amount: Decimal,
    description: Option<String>,
    transaction_date: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    members: Vec<Member>,
    transactions: Vec<TransactionRecord>,
    goals: Vec<Goal>,
    workshops: Vec<Workshop>,
    products: Vec<Product>,
}

impl Tables {
    fn join(&self, record: &TransactionRecord) -> Transaction {
        let member_name = self
            .members
            .iter()
            .find(|m| m.id == record.member_id)
            .map(|m| m.full_name.clone());

        Transaction {
            id: record.id,
            member_id: record.member_id,
            kind: record.kind,
            amount: record.amount,
            description: record.description.clone(),
            transaction_date: record.transaction_date,
            member_name,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member row as-is, balances included.
    pub async fn seed_member(&self, member: Member) {
        self.tables.write().await.members.push(member);
    }

    /// Add a goal row as-is, status and `created_at` included.
    pub async fn seed_goal(&self, goal: Goal) {
        self.tables.write().await.goals.push(goal);
    }
}

#[async_trait]
impl ShgStore for MemoryStore {
    async fn list_members(&self) -> StoreResult<Vec<Member>> {
        let mut members = self.tables.read().await.members.clone();
        members.sort_by(|a, b| b.joined_date.cmp(&a.joined_date));
        Ok(members)
    }

    async fn list_transactions(&self, limit: Option<i64>) -> StoreResult<Vec<Transaction>> {
        let tables = self.tables.read().await;
        let mut records: Vec<&TransactionRecord> = tables.transactions.iter().collect();
        records.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));

        let limit = limit
            .map(|l| usize::try_from(l).unwrap_or(0))
            .unwrap_or(usize::MAX);

        Ok(records
            .into_iter()
            .take(limit)
            .map(|r| tables.join(r))
            .collect())
    }

    async fn list_goals(&self, status: Option<GoalStatus>) -> StoreResult<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .tables
            .read()
            .await
            .goals
            .iter()
            .filter(|g| status.as_ref().map_or(true, |s| &g.status == s))
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    async fn list_workshops(&self) -> StoreResult<Vec<Workshop>> {
        let mut workshops = self.tables.read().await.workshops.clone();
        workshops.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(workshops)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let mut products = self.tables.read().await.products.clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn count(&self, collection: Collection) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = match collection {
            Collection::Members => tables.members.len(),
            Collection::Transactions => tables.transactions.len(),
            Collection::Goals => tables.goals.len(),
            Collection::Workshops => tables.workshops.len(),
            Collection::Products => tables.products.len(),
        };
        Ok(count as i64)
    }

    async fn insert_member(&self, draft: MemberDraft) -> StoreResult<Member> {
        let member = Member {
            id: Uuid::new_v4(),
            full_name: draft.full_name,
            phone: draft.phone,
            village: draft.village,
            total_savings: Decimal::ZERO,
            active_loans: Decimal::ZERO,
            joined_date: Utc::now().date_naive(),
            status: "active".to_string(),
        };
        self.tables.write().await.members.push(member.clone());
        Ok(member)
    }

    async fn insert_transaction(&self, draft: TransactionDraft) -> StoreResult<Transaction> {
        let mut tables = self.tables.write().await;
        if !tables.members.iter().any(|m| m.id == draft.member_id) {
            return Err(StoreError::MemberNotFound(draft.member_id));
        }

        let record = TransactionRecord {
            id: Uuid::new_v4(),
            member_id: draft.member_id,
            kind: draft.kind,
            amount: draft.amount.value(),
            description: draft.description,
            transaction_date: Utc::now(),
        };
        let transaction = tables.join(&record);
        tables.transactions.push(record);
        Ok(transaction)
    }

    async fn insert_goal(&self, draft: GoalDraft) -> StoreResult<Goal> {
        let goal = Goal {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            target_amount: draft.target_amount.value(),
            current_amount: draft.current_amount.value(),
            deadline: draft.deadline,
            status: GoalStatus::Active,
            created_at: Utc::now(),
        };
        self.tables.write().await.goals.push(goal.clone());
        Ok(goal)
    }

    async fn insert_workshop(&self, draft: WorkshopDraft) -> StoreResult<Workshop> {
        let workshop = Workshop {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            facilitator: draft.facilitator,
            max_participants: draft.max_participants,
            registered_count: 0,
            status: WorkshopStatus::Scheduled,
        };
        self.tables.write().await.workshops.push(workshop.clone());
        Ok(workshop)
    }

    async fn insert_product(&self, draft: ProductDraft) -> StoreResult<Product> {
        let product = Product {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            price: draft.price.value(),
            stock: draft.stock,
            created_by: draft.created_by,
            created_at: Utc::now(),
        };
        self.tables.write().await.products.push(product.clone());
        Ok(product)
    }
}
