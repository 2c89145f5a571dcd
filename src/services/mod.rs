use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub mod format;
pub mod ingestion;
pub mod recommendations;

/// Wraps a catalog store call in the caller-supplied deadline.
///
/// The store itself never retries or times out; expiry surfaces here as
/// `StorageUnavailable` and any retry is the caller's choice.
pub async fn with_storage_timeout<T, F>(timeout: Duration, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::StorageUnavailable(format!(
            "Catalog store call exceeded {}ms",
            timeout.as_millis()
        ))),
    }
}
