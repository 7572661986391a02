//! SHG records
//!
//! Rows of the five collections as the service reads them, and the validated
//! drafts it hands to the store for insertion.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Amount, DomainError};

/// Shown for a transaction whose member can no longer be resolved
pub const UNKNOWN_MEMBER: &str = "Unknown";

// =========================================================================
// Members
// =========================================================================

/// A group member. Savings and loan totals are running balances kept by the
/// system of record; nothing here recomputes them from transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub village: String,
    pub total_savings: Decimal,
    pub active_loans: Decimal,
    pub joined_date: NaiveDate,
    pub status: String,
}

impl Member {
    pub fn has_active_loan(&self) -> bool {
        self.active_loans > Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub full_name: String,
    pub phone: String,
    pub village: String,
}

// =========================================================================
// Transactions
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Savings,
    LoanPayment,
    Fine,
    LoanDisbursement,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Savings,
        TransactionType::LoanPayment,
        TransactionType::Fine,
        TransactionType::LoanDisbursement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Savings => "savings",
            TransactionType::LoanPayment => "loan_payment",
            TransactionType::Fine => "fine",
            TransactionType::LoanDisbursement => "loan_disbursement",
        }
    }

    /// Human label, e.g. "loan payment"
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Fines are shown as deductions in the ledger.
    pub fn is_fine(&self) -> bool {
        matches!(self, TransactionType::Fine)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| DomainError::InvalidTransactionType(s.to_string()))
    }
}

/// A ledger event with the joined member name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub member_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub transaction_date: DateTime<Utc>,
    /// `full_name` of the member, when the member still resolves
    pub member_name: Option<String>,
}

impl Transaction {
    pub fn member_display_name(&self) -> &str {
        self.member_name.as_deref().unwrap_or(UNKNOWN_MEMBER)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub member_id: Uuid,
    pub kind: TransactionType,
    pub amount: Amount,
    pub description: Option<String>,
}

// =========================================================================
// Goals
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GoalStatus {
    Active,
    Achieved,
    Other(String),
}

impl GoalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Achieved => "achieved",
            GoalStatus::Other(other) => other,
        }
    }
}

impl From<String> for GoalStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => GoalStatus::Active,
            "achieved" => GoalStatus::Achieved,
            _ => GoalStatus::Other(value),
        }
    }
}

impl From<GoalStatus> for String {
    fn from(status: GoalStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A savings target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Amount,
    pub current_amount: Amount,
    pub deadline: Option<NaiveDate>,
}

// =========================================================================
// Workshops
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkshopStatus {
    Scheduled,
    Completed,
    Other(String),
}

impl WorkshopStatus {
    pub fn as_str(&self) -> &str {
        match self {
            WorkshopStatus::Scheduled => "scheduled",
            WorkshopStatus::Completed => "completed",
            WorkshopStatus::Other(other) => other,
        }
    }
}

impl From<String> for WorkshopStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "scheduled" => WorkshopStatus::Scheduled,
            "completed" => WorkshopStatus::Completed,
            _ => WorkshopStatus::Other(value),
        }
    }
}

impl From<WorkshopStatus> for String {
    fn from(status: WorkshopStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: Option<String>,
    pub facilitator: Option<String>,
    pub max_participants: Option<i32>,
    pub registered_count: i32,
    pub status: WorkshopStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: Option<String>,
    pub facilitator: Option<String>,
    pub max_participants: Option<i32>,
}

// =========================================================================
// Products
// =========================================================================

/// An item made and sold by the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Amount,
    pub stock: i32,
    pub created_by: Option<Uuid>,
}
