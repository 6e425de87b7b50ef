//! Core business logic - framework-agnostic loan ledger operations.

/// Greedy allocation of a payment across open installments
pub mod allocation;
/// Loan creation, repayment and lookups
pub mod loan;
/// Splitting a principal into dated monthly installments
pub mod schedule;

pub use loan::{LoanAggregate, create_loan, repay_loan};
