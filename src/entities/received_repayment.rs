//! Received repayment entity - Append-only log of payments made against a loan.
//!
//! One row is written per repayment call with the full amount received,
//! independent of how that amount was spread over the installments.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Received repayment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "received_repayments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the loan the payment was made against
    pub loan_id: i64,
    /// Total amount received, in minor currency units
    pub amount: i64,
    /// Currency code, stored as given
    pub currency_code: String,
    /// Date the payment was received
    pub received_at: Date,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ReceivedRepayment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one loan
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
