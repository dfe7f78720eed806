//! Transaction coordinator for use cases.
//!
//! A unit of work receives `&DatabaseTransaction` and passes it to every
//! repository call it makes. The transaction is committed only when the unit
//! returns `Ok`; errors, panics, cancellation and the deadline all roll back.

use std::any::Any;
use std::panic::{resume_unwind, AssertUnwindSafe};

use futures::future::BoxFuture;
use futures::FutureExt;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::state::app_state::AppState;

enum Outcome<R> {
    Finished(Result<Result<R, AppError>, Box<dyn Any + Send>>),
    Cancelled,
    TimedOut,
}

/// Run `f` inside a fresh transaction.
///
/// Callers box the unit of work: `with_txn(None, &state, |txn| Box::pin(async move { .. }))`.
/// The closure must own its inputs; it only borrows the transaction.
pub async fn with_txn<R, F>(
    cancel: Option<&CancellationToken>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>> + Send,
    R: Send,
{
    if cancel.is_some_and(CancellationToken::is_cancelled) {
        return Err(cancelled_error());
    }

    let db = require_db(state)?;

    // One deadline covers waiting for a pooled connection and the work itself.
    let deadline = tokio::time::sleep(state.txn_timeout);
    tokio::pin!(deadline);
    let cancelled = async {
        match cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(cancelled);

    let txn = tokio::select! {
        biased;
        _ = &mut cancelled => {
            warn!("cancelled while waiting for a connection");
            return Err(cancelled_error());
        }
        _ = &mut deadline => {
            warn!(timeout_ms = state.txn_timeout.as_millis() as u64, "timed out waiting for a connection");
            return Err(timeout_error());
        }
        begun = db.begin() => begun?,
    };

    let outcome = {
        let work = AssertUnwindSafe(f(&txn)).catch_unwind();

        tokio::select! {
            biased;
            _ = &mut cancelled => Outcome::Cancelled,
            _ = &mut deadline => Outcome::TimedOut,
            res = work => Outcome::Finished(res),
        }
    };

    match outcome {
        Outcome::Finished(Ok(Ok(value))) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(value)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(value)
            }
        },
        Outcome::Finished(Ok(Err(err))) => {
            debug!(error = %err, "unit of work failed; rolling back");
            rollback_best_effort(txn).await;
            Err(err)
        }
        Outcome::Finished(Err(panic)) => {
            warn!("unit of work panicked; rolling back");
            rollback_best_effort(txn).await;
            resume_unwind(panic)
        }
        Outcome::Cancelled => {
            warn!("unit of work cancelled; rolling back");
            rollback_best_effort(txn).await;
            Err(cancelled_error())
        }
        Outcome::TimedOut => {
            warn!(timeout_ms = state.txn_timeout.as_millis() as u64, "unit of work timed out; rolling back");
            rollback_best_effort(txn).await;
            Err(timeout_error())
        }
    }
}

fn cancelled_error() -> AppError {
    DomainError::infra(InfraErrorKind::Cancelled, "request cancelled").into()
}

fn timeout_error() -> AppError {
    DomainError::infra(InfraErrorKind::Timeout, "transaction deadline exceeded").into()
}

/// Roll back, keeping the original outcome if the rollback itself fails.
async fn rollback_best_effort(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        warn!(error = %e, "rollback failed");
    }
}
