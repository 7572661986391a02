//! Insert Handler
//!
//! Validates add-form commands and inserts them through the store.
//! Nothing is written when validation fails.

use std::sync::Arc;

use crate::domain::{Goal, Member, OperationContext, Product, Transaction, Workshop};
use crate::error::AppError;
use crate::store::ShgStore;

use super::{
    CreateGoalCommand, CreateMemberCommand, CreateProductCommand, RecordTransactionCommand,
    ScheduleWorkshopCommand,
};

/// Handler for the five add forms
pub struct InsertHandler {
    store: Arc<dyn ShgStore>,
}

impl InsertHandler {
    pub fn new(store: Arc<dyn ShgStore>) -> Self {
        Self { store }
    }

    pub async fn create_member(
        &self,
        command: CreateMemberCommand,
        context: &OperationContext,
    ) -> Result<Member, AppError> {
        let draft = command.into_draft()?;
        let member = self.store.insert_member(draft).await?;

        tracing::info!(
            member_id = %member.id,
            correlation_id = ?context.correlation_id,
            "Member added"
        );
        Ok(member)
    }

    /// Member totals are left to the system of record; only the ledger row
    /// is written here.
    pub async fn record_transaction(
        &self,
        command: RecordTransactionCommand,
        context: &OperationContext,
    ) -> Result<Transaction, AppError> {
        let draft = command.into_draft()?;
        let transaction = self.store.insert_transaction(draft).await?;

        tracing::info!(
            transaction_id = %transaction.id,
            member_id = %transaction.member_id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            correlation_id = ?context.correlation_id,
            "Transaction recorded"
        );
        Ok(transaction)
    }

    pub async fn create_goal(
        &self,
        command: CreateGoalCommand,
        context: &OperationContext,
    ) -> Result<Goal, AppError> {
        let draft = command.into_draft()?;
        let goal = self.store.insert_goal(draft).await?;

        tracing::info!(
            goal_id = %goal.id,
            target = %goal.target_amount,
            correlation_id = ?context.correlation_id,
            "Goal created"
        );
        Ok(goal)
    }

    pub async fn schedule_workshop(
        &self,
        command: ScheduleWorkshopCommand,
        context: &OperationContext,
    ) -> Result<Workshop, AppError> {
        let draft = command.into_draft()?;
        let workshop = self.store.insert_workshop(draft).await?;

        tracing::info!(
            workshop_id = %workshop.id,
            date = %workshop.date,
            correlation_id = ?context.correlation_id,
            "Workshop scheduled"
        );
        Ok(workshop)
    }

    pub async fn create_product(
        &self,
        command: CreateProductCommand,
        context: &OperationContext,
    ) -> Result<Product, AppError> {
        let draft = command.into_draft(context.actor_id)?;
        let product = self.store.insert_product(draft).await?;

        tracing::info!(
            product_id = %product.id,
            created_by = ?product.created_by,
            correlation_id = ?context.correlation_id,
            "Product added"
        );
        Ok(product)
    }
}
