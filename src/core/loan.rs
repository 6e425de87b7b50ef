//! Loan business logic - Creates loans and applies repayments against them.
//!
//! A loan and its installments form one aggregate. It only changes through
//! [`create_loan`] and [`repay_loan`], each of which runs inside a single database
//! transaction, so a failure leaves neither orphan installments nor a half-applied
//! payment behind. Related rows are always loaded through explicit queries keyed
//! by loan id.

use crate::{
    config::LedgerConfig,
    core::{allocation, schedule},
    entities::{
        Loan, LoanStatus, ReceivedRepayment, RepaymentStatus, ScheduledRepayment, loan,
        received_repayment, scheduled_repayment,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// A loan together with its installment plan and payment log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanAggregate {
    /// The loan row
    pub loan: loan::Model,
    /// Installments ordered by due date
    pub scheduled: Vec<scheduled_repayment::Model>,
    /// Payments ordered by the date they were received
    pub received: Vec<received_repayment::Model>,
}

/// Creates a loan and its full monthly repayment schedule.
///
/// The principal is split into `terms` installments (remainder on the trailing
/// ones) falling due one calendar month apart from `processed_at`. Inputs are
/// validated before anything is written; the loan row and every installment are
/// then inserted in one transaction.
///
/// # Arguments
/// * `user_id` - Owner of the loan
/// * `amount` - Principal in minor currency units, must be positive
/// * `currency_code` - Stored as given on the loan and each installment
/// * `terms` - Number of installments, must be positive
/// * `processed_at` - Origination date
#[instrument(skip(db, currency_code))]
pub async fn create_loan(
    db: &DatabaseConnection,
    user_id: i64,
    amount: i64,
    currency_code: String,
    terms: i32,
    processed_at: NaiveDate,
) -> Result<loan::Model> {
    let installments = schedule::build_schedule(amount, terms, processed_at)?;

    let txn = db.begin().await?;

    let loan = loan::ActiveModel {
        user_id: Set(user_id),
        amount: Set(amount),
        terms: Set(terms),
        outstanding_amount: Set(amount),
        currency_code: Set(currency_code.clone()),
        processed_at: Set(processed_at),
        status: Set(LoanStatus::Due),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for installment in &installments {
        scheduled_repayment::ActiveModel {
            loan_id: Set(loan.id),
            amount: Set(installment.amount),
            outstanding_amount: Set(installment.amount),
            currency_code: Set(currency_code.clone()),
            due_date: Set(installment.due_date),
            status: Set(RepaymentStatus::Due),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        loan_id = loan.id,
        amount,
        terms,
        "Created loan with {} scheduled repayments",
        installments.len()
    );
    Ok(loan)
}

/// Creates a loan, falling back to the configured currency when none is given.
pub async fn create_loan_with_config(
    db: &DatabaseConnection,
    config: &LedgerConfig,
    user_id: i64,
    amount: i64,
    currency_code: Option<String>,
    terms: i32,
    processed_at: NaiveDate,
) -> Result<loan::Model> {
    let currency_code = config.currency_or_default(currency_code);
    create_loan(db, user_id, amount, currency_code, terms, processed_at).await
}

/// Records a payment against a loan and allocates it to open installments.
///
/// One received repayment is written for the full `amount`. The payment then
/// closes Due/Partial installments in due-date order until it is used up, and the
/// loan balance drops by `amount`, floored at zero. Paying more than is
/// outstanding is accepted; the excess is not applied anywhere.
///
/// The loan row is re-read inside the transaction, so a stale `loan` from the
/// caller only identifies which loan to pay. Replaying a call records a second
/// payment.
#[instrument(skip(db, loan, currency_code), fields(loan_id = loan.id))]
pub async fn repay_loan(
    db: &DatabaseConnection,
    loan: &loan::Model,
    amount: i64,
    currency_code: String,
    received_at: NaiveDate,
) -> Result<received_repayment::Model> {
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let txn = db.begin().await?;

    let current = Loan::find_by_id(loan.id)
        .one(&txn)
        .await?
        .ok_or(Error::LoanNotFound { id: loan.id })?;

    let receipt = received_repayment::ActiveModel {
        loan_id: Set(current.id),
        amount: Set(amount),
        currency_code: Set(currency_code),
        received_at: Set(received_at),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let open = open_installments(&txn, current.id).await?;
    let allocation = allocation::allocate(amount, open);

    for installment in allocation.updated {
        debug!(
            installment_id = installment.id,
            outstanding_amount = installment.outstanding_amount,
            status = ?installment.status,
            "Applying repayment to installment"
        );
        let outstanding_amount = installment.outstanding_amount;
        let status = installment.status;
        let mut active_model: scheduled_repayment::ActiveModel = installment.into();
        active_model.outstanding_amount = Set(outstanding_amount);
        active_model.status = Set(status);
        active_model.update(&txn).await?;
    }

    if allocation.unapplied > 0 {
        warn!(
            unapplied = allocation.unapplied,
            "Repayment exceeds the scheduled balance; excess was not applied"
        );
    }

    let outstanding_amount = (current.outstanding_amount - amount).max(0);
    let status = LoanStatus::from_outstanding(outstanding_amount);
    let mut active_model: loan::ActiveModel = current.into();
    active_model.outstanding_amount = Set(outstanding_amount);
    active_model.status = Set(status);
    active_model.update(&txn).await?;

    txn.commit().await?;

    info!(
        received_repayment_id = receipt.id,
        amount,
        outstanding_amount,
        "Recorded loan repayment"
    );
    Ok(receipt)
}

/// Installments that still accept payments, in the order payments reach them.
async fn open_installments<C>(db: &C, loan_id: i64) -> Result<Vec<scheduled_repayment::Model>>
where
    C: ConnectionTrait,
{
    ScheduledRepayment::find()
        .filter(scheduled_repayment::Column::LoanId.eq(loan_id))
        .filter(
            scheduled_repayment::Column::Status
                .is_in([RepaymentStatus::Due, RepaymentStatus::Partial]),
        )
        .order_by_asc(scheduled_repayment::Column::DueDate)
        .order_by_asc(scheduled_repayment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a loan by its unique ID.
pub async fn get_loan_by_id(db: &DatabaseConnection, loan_id: i64) -> Result<Option<loan::Model>> {
    Loan::find_by_id(loan_id).one(db).await.map_err(Into::into)
}

/// Retrieves every loan owned by a user, oldest first.
pub async fn get_loans_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<loan::Model>> {
    Loan::find()
        .filter(loan::Column::UserId.eq(user_id))
        .order_by_asc(loan::Column::ProcessedAt)
        .order_by_asc(loan::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a loan's full installment plan, ordered by due date.
pub async fn get_scheduled_repayments(
    db: &DatabaseConnection,
    loan_id: i64,
) -> Result<Vec<scheduled_repayment::Model>> {
    ScheduledRepayment::find()
        .filter(scheduled_repayment::Column::LoanId.eq(loan_id))
        .order_by_asc(scheduled_repayment::Column::DueDate)
        .order_by_asc(scheduled_repayment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every payment received for a loan, in the order received.
pub async fn get_received_repayments(
    db: &DatabaseConnection,
    loan_id: i64,
) -> Result<Vec<received_repayment::Model>> {
    ReceivedRepayment::find()
        .filter(received_repayment::Column::LoanId.eq(loan_id))
        .order_by_asc(received_repayment::Column::ReceivedAt)
        .order_by_asc(received_repayment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a loan with its installments and payments.
///
/// Returns `LoanNotFound` if no loan has the given id.
pub async fn load_loan_aggregate(db: &DatabaseConnection, loan_id: i64) -> Result<LoanAggregate> {
    let loan = get_loan_by_id(db, loan_id)
        .await?
        .ok_or(Error::LoanNotFound { id: loan_id })?;
    let scheduled = get_scheduled_repayments(db, loan_id).await?;
    let received = get_received_repayments(db, loan_id).await?;

    Ok(LoanAggregate {
        loan,
        scheduled,
        received,
    })
}

/// The earliest installment that still has something outstanding, if any.
pub async fn next_due_installment(
    db: &DatabaseConnection,
    loan_id: i64,
) -> Result<Option<scheduled_repayment::Model>> {
    Ok(open_installments(db, loan_id).await?.into_iter().next())
}
