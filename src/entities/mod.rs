//! Entity module - Contains all SeaORM entity definitions for the ledger tables.
//! A loan owns its scheduled repayments (the installment plan) and its received
//! repayments (the append-only payment log). Each entity has a Model struct for
//! data and an Entity struct for operations.

pub mod loan;
pub mod received_repayment;
pub mod scheduled_repayment;

// Re-export specific types to avoid conflicts
pub use loan::{Column as LoanColumn, Entity as Loan, LoanStatus, Model as LoanModel};
pub use received_repayment::{
    Column as ReceivedRepaymentColumn, Entity as ReceivedRepayment,
    Model as ReceivedRepaymentModel,
};
pub use scheduled_repayment::{
    Column as ScheduledRepaymentColumn, Entity as ScheduledRepayment,
    Model as ScheduledRepaymentModel, RepaymentStatus,
};
