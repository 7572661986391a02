//! Page views
//!
//! One payload per page of the dashboard. A view is loaded fresh from the
//! store on every request and owned by that request alone; there is no
//! shared cache between pages.

mod dashboard;
mod pages;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{compute_goal_progress, Goal, GoalProgress, Transaction};

pub use dashboard::DashboardView;
pub use pages::{FinancialView, GoalsView, MembersView, ProductsView, WorkshopsView};

/// Tunables for view loading
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    pub recent_transactions_limit: i64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            recent_transactions_limit: 4,
        }
    }
}

/// A goal with its progress as of the request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalCard {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
}

impl GoalCard {
    pub fn new(goal: Goal, now: DateTime<Utc>) -> Self {
        let progress = compute_goal_progress(&goal, now);
        Self { goal, progress }
    }
}

/// A ledger line as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub member_display_name: String,
    pub type_label: String,
    pub is_deduction: bool,
}

impl From<Transaction> for LedgerEntry {
    fn from(transaction: Transaction) -> Self {
        Self {
            member_display_name: transaction.member_display_name().to_string(),
            type_label: transaction.kind.label(),
            is_deduction: transaction.kind.is_fine(),
            transaction,
        }
    }
}
