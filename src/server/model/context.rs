//! Cancellation and deadlines for core operations.

use std::{future::Future, time::Duration};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::server::error::{purchase::PurchaseError, AppError};

/// Caller-supplied cancellation signal and optional deadline.
///
/// Operations call [`OperationContext::checkpoint`] before touching a store and,
/// during purchases, between the wallet debit and the ledger write. Store reads that
/// happen before a debit are additionally wrapped in [`OperationContext::bounded`] so
/// a stalled query cannot outlive the deadline.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationContext {
    pub fn new(cancel: CancellationToken, deadline: Option<Instant>) -> Self {
        Self { cancel, deadline }
    }

    /// Context that is cancelled with `cancel` or after `timeout`, whichever comes first.
    pub fn with_timeout(cancel: CancellationToken, timeout: Duration) -> Self {
        Self::new(cancel, Some(Instant::now() + timeout))
    }

    /// Returns an error if the operation should stop.
    ///
    /// # Returns
    /// - `Ok(())` - Keep going
    /// - `Err(PurchaseError::Cancelled)` - Token was cancelled
    /// - `Err(PurchaseError::DeadlineExceeded)` - Deadline has passed
    pub fn checkpoint(&self) -> Result<(), PurchaseError> {
        if self.cancel.is_cancelled() {
            return Err(PurchaseError::Cancelled);
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(PurchaseError::DeadlineExceeded);
            }
        }

        Ok(())
    }

    /// Awaits `fut`, abandoning it once the deadline passes.
    ///
    /// Only for work that is safe to drop halfway, such as reads before the wallet
    /// is debited. Without a deadline this is a plain await.
    ///
    /// # Returns
    /// - `Ok(T)` / `Err(AppError)` - Output of `fut`
    /// - `Err(PurchaseError::DeadlineExceeded)` - Deadline passed first
    pub async fn bounded<F, T>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| PurchaseError::DeadlineExceeded)?,
            None => fut.await,
        }
    }
}
