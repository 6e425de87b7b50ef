//! Scheduled repayment entity - One installment of a loan's repayment plan.
//!
//! Installments are written once when the loan is created and afterwards only
//! change through repayment allocation. `outstanding_amount` stays within
//! `0..=amount` and `status` is derived from it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Settlement state of a single installment
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum RepaymentStatus {
    /// Nothing has been paid towards this installment
    #[sea_orm(string_value = "due")]
    Due,
    /// Some, but not all, of the installment has been paid
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Fully paid
    #[sea_orm(string_value = "repaid")]
    Repaid,
}

impl RepaymentStatus {
    /// Derives the installment status from what is left to pay against its size.
    #[must_use]
    pub const fn from_outstanding(outstanding_amount: i64, amount: i64) -> Self {
        if outstanding_amount <= 0 {
            Self::Repaid
        } else if outstanding_amount >= amount {
            Self::Due
        } else {
            Self::Partial
        }
    }
}

/// Scheduled repayment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scheduled_repayments")]
pub struct Model {
    /// Unique identifier for the installment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning loan
    pub loan_id: i64,
    /// Fixed installment size in minor currency units
    pub amount: i64,
    /// Amount still to be paid on this installment
    pub outstanding_amount: i64,
    /// Currency code copied from the loan
    pub currency_code: String,
    /// Date the installment falls due
    pub due_date: Date,
    /// Current settlement state
    pub status: RepaymentStatus,
}

/// Defines relationships between ScheduledRepayment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each installment belongs to one loan
    #[sea_orm(
        belongs_to = "super::loan::Entity",
        from = "Column::LoanId",
        to = "super::loan::Column::Id",
        on_delete = "Cascade"
    )]
    Loan,
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
