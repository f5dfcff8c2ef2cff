use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future borrowed from the transaction handed to a `with_txn` closure.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'a>>;

/// Run `f` inside a fresh transaction: commit on `Ok`, roll back on `Err`.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rb) = txn.rollback().await {
                tracing::warn!(error = %rb, "rollback failed");
            }
            Err(err)
        }
    }
}
