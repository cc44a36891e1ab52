//! Read-through helper over the per-user response cache.

use std::future::Future;

use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tally_core::cache::{CacheKey, ResponseCache};
use tally_shared::AppError;
use tracing::debug;

use crate::error::ApiError;

/// Returns the cached response for `key`, or runs `load` and caches its
/// result.
///
/// The key must be built before `load` reads anything so that a concurrent
/// write invalidates the entry.
///
/// # Errors
///
/// Returns the error of `load`, or an internal error if the result cannot
/// be serialized.
pub async fn cached_json<T, F, Fut>(
    cache: &ResponseCache,
    key: CacheKey,
    load: F,
) -> Result<Json<Value>, ApiError>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    if let Some(hit) = cache.get(&key) {
        debug!(?key, "cache hit");
        return Ok(Json(Value::clone(&hit)));
    }
    debug!(?key, "cache miss");

    let value =
        serde_json::to_value(load().await?).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(Value::clone(&cache.insert(key, value))))
}
