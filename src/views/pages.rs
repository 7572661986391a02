//! List pages
//!
//! Members, Financial, Goals, Workshops and Products. Unlike the dashboard,
//! a failed fetch fails the whole page.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Member, Product, Workshop};
use crate::store::{ShgStore, StoreResult};

use super::{GoalCard, LedgerEntry};

#[derive(Debug, Clone, Serialize)]
pub struct MembersView {
    pub members: Vec<Member>,
}

impl MembersView {
    pub async fn load(store: &dyn ShgStore) -> StoreResult<Self> {
        Ok(Self {
            members: store.list_members().await?,
        })
    }
}

/// The ledger, plus the members for the add form's member picker.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialView {
    pub transactions: Vec<LedgerEntry>,
    pub members: Vec<Member>,
}

impl FinancialView {
    pub async fn load(store: &dyn ShgStore) -> StoreResult<Self> {
        let transactions = store
            .list_transactions(None)
            .await?
            .into_iter()
            .map(LedgerEntry::from)
            .collect();
        let members = store.list_members().await?;

        Ok(Self {
            transactions,
            members,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalsView {
    pub goals: Vec<GoalCard>,
}

impl GoalsView {
    pub async fn load(store: &dyn ShgStore, now: DateTime<Utc>) -> StoreResult<Self> {
        let goals = store
            .list_goals(None)
            .await?
            .into_iter()
            .map(|goal| GoalCard::new(goal, now))
            .collect();

        Ok(Self { goals })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkshopsView {
    pub workshops: Vec<Workshop>,
}

impl WorkshopsView {
    pub async fn load(store: &dyn ShgStore) -> StoreResult<Self> {
        Ok(Self {
            workshops: store.list_workshops().await?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsView {
    pub products: Vec<Product>,
}

impl ProductsView {
    pub async fn load(store: &dyn ShgStore) -> StoreResult<Self> {
        Ok(Self {
            products: store.list_products().await?,
        })
    }
}
