//! Command definitions
//!
//! Commands carry the add-forms exactly as submitted: every field is text,
//! and an absent field reads as blank. `into_draft` validates a command into
//! the typed draft the store inserts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::input::{optional_date, optional_text, required_date, required_text};
use crate::domain::{
    Amount, DomainError, GoalDraft, MemberDraft, NumericInput, ProductDraft, TransactionDraft,
    TransactionType, WorkshopDraft,
};
use rust_decimal::Decimal;

// =========================================================================
// Members
// =========================================================================

/// Command to add a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemberCommand {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub village: String,
}

impl CreateMemberCommand {
    pub fn new(full_name: impl Into<String>, phone: impl Into<String>, village: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            village: village.into(),
        }
    }

    pub fn into_draft(self) -> Result<MemberDraft, DomainError> {
        Ok(MemberDraft {
            full_name: required_text("full_name", &self.full_name)?,
            phone: required_text("phone", &self.phone)?,
            village: required_text("village", &self.village)?,
        })
    }
}

// =========================================================================
// Transactions
// =========================================================================

/// Command to record a ledger event for a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordTransactionCommand {
    #[serde(default)]
    pub member_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RecordTransactionCommand {
    pub fn new(member_id: Uuid, kind: TransactionType, amount: impl Into<String>) -> Self {
        Self {
            member_id: member_id.to_string(),
            kind: kind.as_str().to_string(),
            amount: amount.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn into_draft(self) -> Result<TransactionDraft, DomainError> {
        let member_id = required_text("member_id", &self.member_id)?;
        let member_id = Uuid::parse_str(&member_id).map_err(|_| DomainError::InvalidId {
            field: "member_id",
            value: member_id.clone(),
        })?;

        let kind: TransactionType = required_text("type", &self.kind)?.parse()?;

        let amount = NumericInput::<Decimal>::parse(Some(&self.amount)).required("amount")?;

        Ok(TransactionDraft {
            member_id,
            kind,
            amount: Amount::new(amount)?,
            description: optional_text(self.description),
        })
    }
}

// =========================================================================
// Goals
// =========================================================================

/// Command to set a savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalCommand {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_amount: String,
    #[serde(default)]
    pub current_amount: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

impl CreateGoalCommand {
    pub fn new(title: impl Into<String>, target_amount: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            target_amount: target_amount.into(),
            current_amount: None,
            deadline: None,
        }
    }

    pub fn with_current_amount(mut self, current_amount: impl Into<String>) -> Self {
        self.current_amount = Some(current_amount.into());
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn into_draft(self) -> Result<GoalDraft, DomainError> {
        let target =
            NumericInput::<Decimal>::parse(Some(&self.target_amount)).required("target_amount")?;

        // An empty current amount means nothing saved yet
        let current = NumericInput::<Decimal>::parse(self.current_amount.as_deref())
            .optional("current_amount")?
            .map(Amount::new)
            .transpose()?
            .unwrap_or_else(Amount::zero);

        Ok(GoalDraft {
            title: required_text("title", &self.title)?,
            description: optional_text(self.description),
            target_amount: Amount::new(target)?,
            current_amount: current,
            deadline: optional_date("deadline", self.deadline.as_deref())?,
        })
    }
}

// =========================================================================
// Workshops
// =========================================================================

/// Command to schedule a workshop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWorkshopCommand {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub facilitator: Option<String>,
    #[serde(default)]
    pub max_participants: Option<String>,
}

impl ScheduleWorkshopCommand {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: date.into(),
            time: None,
            location: None,
            facilitator: None,
            max_participants: None,
        }
    }

    pub fn into_draft(self) -> Result<WorkshopDraft, DomainError> {
        let max_participants = NumericInput::<i32>::parse(self.max_participants.as_deref())
            .optional("max_participants")?;
        if max_participants.is_some_and(|max| max < 0) {
            return Err(DomainError::InvalidNumber {
                field: "max_participants",
                value: self.max_participants.unwrap_or_default(),
            });
        }

        Ok(WorkshopDraft {
            title: required_text("title", &self.title)?,
            description: optional_text(self.description),
            date: required_date("date", &self.date)?,
            time: optional_text(self.time),
            location: optional_text(self.location),
            facilitator: optional_text(self.facilitator),
            max_participants,
        })
    }
}

// =========================================================================
// Products
// =========================================================================

/// Command to list a product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductCommand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
}

impl CreateProductCommand {
    pub fn new(name: impl Into<String>, price: impl Into<String>, stock: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            price: price.into(),
            stock: stock.into(),
        }
    }

    /// `created_by` is the organizer submitting the form, when known.
    pub fn into_draft(self, created_by: Option<Uuid>) -> Result<ProductDraft, DomainError> {
        let price = NumericInput::<Decimal>::parse(Some(&self.price)).required("price")?;
        let stock = NumericInput::<i32>::parse(Some(&self.stock)).required("stock")?;
        if stock < 0 {
            return Err(DomainError::InvalidNumber {
                field: "stock",
                value: self.stock,
            });
        }

        Ok(ProductDraft {
            name: required_text("name", &self.name)?,
            description: optional_text(self.description),
            price: Amount::new(price)?,
            stock,
            created_by,
        })
    }
}
