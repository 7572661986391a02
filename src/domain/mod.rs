//! Domain module
//!
//! Core SHG records, form parsing and derived metrics.

pub mod amount;
pub mod context;
pub mod error;
pub mod input;
pub mod metrics;
pub mod models;

pub use amount::{Amount, AmountError};
pub use context::OperationContext;
pub use error::DomainError;
pub use input::NumericInput;
pub use metrics::{
    aggregate_member_stats, compute_goal_progress, select_current_goal, GoalProgress, MemberStats,
};
pub use models::{
    Goal, GoalDraft, GoalStatus, Member, MemberDraft, Product, ProductDraft, Transaction,
    TransactionDraft, TransactionType, Workshop, WorkshopDraft, WorkshopStatus,
};
