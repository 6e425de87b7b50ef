//! Loan entity - The head row of a loan aggregate.
//!
//! A loan records the principal `amount` in minor currency units, the number of
//! installments (`terms`) and the running `outstanding_amount`. Its `status` is
//! `Repaid` exactly when nothing is outstanding.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a loan
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum LoanStatus {
    /// Some balance is still outstanding
    #[sea_orm(string_value = "due")]
    Due,
    /// Outstanding balance has reached zero
    #[sea_orm(string_value = "repaid")]
    Repaid,
}

impl LoanStatus {
    /// Derives the loan status from its outstanding balance.
    #[must_use]
    pub const fn from_outstanding(outstanding_amount: i64) -> Self {
        if outstanding_amount == 0 {
            Self::Repaid
        } else {
            Self::Due
        }
    }
}

/// Loan database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    /// Unique identifier for the loan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the loan, never changes after creation
    pub user_id: i64,
    /// Principal in minor currency units
    pub amount: i64,
    /// Number of monthly installments
    pub terms: i32,
    /// Principal not yet repaid, floored at zero
    pub outstanding_amount: i64,
    /// Currency code, stored as given (e.g. `"VND"`)
    pub currency_code: String,
    /// Date the loan originated; installments fall due monthly from here
    pub processed_at: Date,
    /// Current lifecycle state
    pub status: LoanStatus,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Loan and its repayment records
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One loan has many scheduled installments
    #[sea_orm(has_many = "super::scheduled_repayment::Entity")]
    ScheduledRepayments,
    /// One loan has many received payments
    #[sea_orm(has_many = "super::received_repayment::Entity")]
    ReceivedRepayments,
}

impl Related<super::scheduled_repayment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledRepayments.def()
    }
}

impl Related<super::received_repayment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceivedRepayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
