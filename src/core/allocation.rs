//! Repayment allocation - Spreads a received payment over open installments.
//!
//! The payment is applied greedily in the order the installments are given,
//! which callers arrange to be due-date ascending. Each installment is either
//! closed in full or, when the payment runs out, reduced and left `Partial`.

use crate::entities::{RepaymentStatus, scheduled_repayment};

/// Outcome of allocating one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Installments the payment touched, with their updated balances
    pub updated: Vec<scheduled_repayment::Model>,
    /// Part of the payment left over once every open installment was closed
    pub unapplied: i64,
}

/// Applies `amount` to `installments` in order.
///
/// Installments after the point where the payment is exhausted are not
/// returned. A zero-sized installment passed over by the payment is closed.
#[must_use]
pub fn allocate(amount: i64, installments: Vec<scheduled_repayment::Model>) -> Allocation {
    let mut remaining = amount;
    let mut updated = Vec::new();

    for mut installment in installments {
        if remaining <= 0 {
            break;
        }
        let applied = remaining.min(installment.outstanding_amount);
        remaining -= applied;
        installment.outstanding_amount -= applied;
        installment.status =
            RepaymentStatus::from_outstanding(installment.outstanding_amount, installment.amount);

        updated.push(installment);
    }

    Allocation {
        updated,
        unapplied: remaining,
    }
}
