//! Postgres store
//!
//! `ShgStore` over a sqlx connection pool. Schema lives in `migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    Goal, GoalDraft, GoalStatus, Member, MemberDraft, Product, ProductDraft, Transaction,
    TransactionDraft, Workshop, WorkshopDraft,
};

use super::{Collection, ShgStore, StoreError, StoreResult};

const MEMBER_COLUMNS: &str =
    "id, full_name, phone, village, total_savings, active_loans, joined_date, status";
const GOAL_COLUMNS: &str =
    "id, title, description, target_amount, current_amount, deadline, status, created_at";
const WORKSHOP_COLUMNS: &str = "id, title, description, date, time, location, facilitator, \
     max_participants, registered_count, status";
const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, created_by, created_at";

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =========================================================================
// Row types
// =========================================================================

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    full_name: String,
    phone: String,
    village: String,
    total_savings: Decimal,
    active_loans: Decimal,
    joined_date: NaiveDate,
    status: String,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            village: row.village,
            total_savings: row.total_savings,
            active_loans: row.active_loans,
            joined_date: row.joined_date,
            status: row.status,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    member_id: Uuid,
    #[sqlx(rename = "type")]
    kind: String,
    amount: Decimal,
    description: Option<String>,
    transaction_date: DateTime<Utc>,
    member_name: Option<String>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let kind = row.kind.parse().map_err(|_| StoreError::CorruptRow {
            collection: "transactions",
            id: row.id,
            reason: format!("unknown type {:?}", row.kind),
        })?;

        Ok(Transaction {
            id: row.id,
            member_id: row.member_id,
            kind,
            amount: row.amount,
            description: row.description,
            transaction_date: row.transaction_date,
            member_name: row.member_name,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GoalRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    target_amount: Decimal,
    current_amount: Decimal,
    deadline: Option<NaiveDate>,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Goal {
            id: row.id,
            title: row.title,
            description: row.description,
            target_amount: row.target_amount,
            current_amount: row.current_amount,
            deadline: row.deadline,
            status: row.status.into(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WorkshopRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    date: NaiveDate,
    time: Option<String>,
    location: Option<String>,
    facilitator: Option<String>,
    max_participants: Option<i32>,
    registered_count: i32,
    status: String,
}

impl From<WorkshopRow> for Workshop {
    fn from(row: WorkshopRow) -> Self {
        Workshop {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            time: row.time,
            location: row.location,
            facilitator: row.facilitator,
            max_participants: row.max_participants,
            registered_count: row.registered_count,
            status: row.status.into(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

// =========================================================================
// ShgStore
// =========================================================================

#[async_trait]
impl ShgStore for PgStore {
    async fn list_members(&self) -> StoreResult<Vec<Member>> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY joined_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn list_transactions(&self, limit: Option<i64>) -> StoreResult<Vec<Transaction>> {
        // LIMIT NULL means no limit
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.member_id, t.type, t.amount, t.description, t.transaction_date,
                   m.full_name AS member_name
            FROM transactions t
            LEFT JOIN members m ON m.id = t.member_id
            ORDER BY t.transaction_date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn list_goals(&self, status: Option<GoalStatus>) -> StoreResult<Vec<Goal>> {
        let rows: Vec<GoalRow> = sqlx::query_as(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC"
        ))
        .bind(status.map(String::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn list_workshops(&self) -> StoreResult<Vec<Workshop>> {
        let rows: Vec<WorkshopRow> = sqlx::query_as(&format!(
            "SELECT {WORKSHOP_COLUMNS} FROM workshops ORDER BY date ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Workshop::from).collect())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn count(&self, collection: Collection) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", collection.table_name()))
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn insert_member(&self, draft: MemberDraft) -> StoreResult<Member> {
        let row: MemberRow = sqlx::query_as(&format!(
            "INSERT INTO members (full_name, phone, village) VALUES ($1, $2, $3) \
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(&draft.full_name)
        .bind(&draft.phone)
        .bind(&draft.village)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(member_id = %row.id, "Member row inserted");
        Ok(row.into())
    }

    async fn insert_transaction(&self, draft: TransactionDraft) -> StoreResult<Transaction> {
        let result = sqlx::query_as::<_, TransactionRow>(
            r#"
            WITH inserted AS (
                INSERT INTO transactions (member_id, type, amount, description)
                VALUES ($1, $2, $3, $4)
                RETURNING id, member_id, type, amount, description, transaction_date
            )
            SELECT i.id, i.member_id, i.type, i.amount, i.description, i.transaction_date,
                   m.full_name AS member_name
            FROM inserted i
            LEFT JOIN members m ON m.id = i.member_id
            "#,
        )
        .bind(draft.member_id)
        .bind(draft.kind.as_str())
        .bind(draft.amount.value())
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await;

        let row = match result {
            Ok(row) => row,
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                return Err(StoreError::MemberNotFound(draft.member_id));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(transaction_id = %row.id, member_id = %row.member_id, "Transaction row inserted");
        row.try_into()
    }

    async fn insert_goal(&self, draft: GoalDraft) -> StoreResult<Goal> {
        let row: GoalRow = sqlx::query_as(&format!(
            "INSERT INTO goals (title, description, target_amount, current_amount, deadline) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {GOAL_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.target_amount.value())
        .bind(draft.current_amount.value())
        .bind(draft.deadline)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn insert_workshop(&self, draft: WorkshopDraft) -> StoreResult<Workshop> {
        let row: WorkshopRow = sqlx::query_as(&format!(
            "INSERT INTO workshops \
             (title, description, date, time, location, facilitator, max_participants) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {WORKSHOP_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.date)
        .bind(&draft.time)
        .bind(&draft.location)
        .bind(&draft.facilitator)
        .bind(draft.max_participants)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn insert_product(&self, draft: ProductDraft) -> StoreResult<Product> {
        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO products (name, description, price, stock, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price.value())
        .bind(draft.stock)
        .bind(draft.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
