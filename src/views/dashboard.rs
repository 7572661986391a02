//! Dashboard view
//!
//! Member totals, activity counts, the featured goal and the latest ledger
//! lines. Each section loads on its own: a section whose fetch fails is
//! logged and rendered empty while the others still show.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{aggregate_member_stats, select_current_goal, GoalStatus, MemberStats};
use crate::store::{Collection, ShgStore, StoreResult};

use super::{GoalCard, LedgerEntry, ViewSettings};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: MemberStats,
    pub workshops: i64,
    pub products: i64,
    pub current_goal: Option<GoalCard>,
    pub recent_transactions: Vec<LedgerEntry>,
}

impl DashboardView {
    pub async fn load(
        store: &dyn ShgStore,
        settings: ViewSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let members = or_empty("members", store.list_members().await);
        let stats = aggregate_member_stats(&members);

        let workshops = or_empty("workshops", store.count(Collection::Workshops).await);
        let products = or_empty("products", store.count(Collection::Products).await);

        let goals = or_empty("goals", store.list_goals(Some(GoalStatus::Active)).await);
        let current_goal = select_current_goal(&goals)
            .cloned()
            .map(|goal| GoalCard::new(goal, now));

        let recent_transactions = or_empty(
            "transactions",
            store
                .list_transactions(Some(settings.recent_transactions_limit))
                .await,
        )
        .into_iter()
        .map(LedgerEntry::from)
        .collect();

        Self {
            stats,
            workshops,
            products,
            current_goal,
            recent_transactions,
        }
    }
}

fn or_empty<T: Default>(section: &'static str, result: StoreResult<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(section, error = %e, "Dashboard section failed to load");
        T::default()
    })
}
