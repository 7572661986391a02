//! Derived metrics
//!
//! Pure summaries over fetched collections: member savings and loan totals,
//! and progress toward a savings goal. Recomputed on every view load.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Goal, Member};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Savings and loan totals across the listed members.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MemberStats {
    pub total_savings: Decimal,
    pub avg_savings: Decimal,
    /// Number of listed members
    pub active_members: usize,
    /// Members with an outstanding loan
    pub active_loans_count: usize,
    pub active_loan_amount: Decimal,
}

/// Where a goal stands relative to `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    /// `None` when the target is zero
    pub progress_pct: Option<Decimal>,
    /// Negative when overfunded
    pub remaining: Decimal,
    /// `None` without a deadline, negative once it has passed
    pub days_left: Option<i64>,
}

pub fn aggregate_member_stats(members: &[Member]) -> MemberStats {
    let total_savings: Decimal = members.iter().map(|m| m.total_savings).sum();
    let active_loan_amount: Decimal = members.iter().map(|m| m.active_loans).sum();
    let active_loans_count = members.iter().filter(|m| m.has_active_loan()).count();

    let avg_savings = if members.is_empty() {
        Decimal::ZERO
    } else {
        total_savings / Decimal::from(members.len())
    };

    MemberStats {
        total_savings,
        avg_savings,
        active_members: members.len(),
        active_loans_count,
        active_loan_amount,
    }
}

pub fn compute_goal_progress(goal: &Goal, now: DateTime<Utc>) -> GoalProgress {
    let progress_pct = if goal.target_amount.is_zero() {
        None
    } else {
        Some(goal.current_amount / goal.target_amount * Decimal::ONE_HUNDRED)
    };

    // Deadlines are calendar dates and expire at midnight UTC.
    let days_left = goal.deadline.map(|deadline| {
        let due = deadline.and_time(NaiveTime::MIN).and_utc();
        ceil_div(due.timestamp_millis() - now.timestamp_millis(), MILLIS_PER_DAY)
    });

    GoalProgress {
        progress_pct,
        remaining: goal.target_amount - goal.current_amount,
        days_left,
    }
}

/// The goal the dashboard features: the most recently created active one.
pub fn select_current_goal(goals: &[Goal]) -> Option<&Goal> {
    goals
        .iter()
        .filter(|g| g.is_active())
        .max_by_key(|g| g.created_at)
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    -(-numerator).div_euclid(denominator)
}
