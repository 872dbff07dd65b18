use crate::core::{Address, GeoProvider, LookupError, LookupResult, LookupSlots};
use crate::utils::error::{LocateError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Looks up every address concurrently and waits for all of them.
///
/// One task is spawned per address. Each task only produces its own outcome,
/// which is stored in the slot at the task's input index once joined, so the
/// returned slots always line up with `addresses`. A failing or panicking
/// task never affects its siblings. There is no retry.
///
/// `concurrency_limit` caps in-flight provider calls and is clamped to
/// `1..=Semaphore::MAX_PERMITS`; `None` lets every address run at once, so
/// callers must bound the batch size themselves.
pub async fn lookup_many<P>(
    provider: Arc<P>,
    addresses: &[Address],
    concurrency_limit: Option<usize>,
) -> LookupSlots
where
    P: GeoProvider + ?Sized + 'static,
{
    let limiter = concurrency_limit
        .map(|limit| Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS))));

    tracing::debug!(
        "Dispatching {} lookups (limit: {:?})",
        addresses.len(),
        concurrency_limit
    );

    let handles: Vec<_> = addresses
        .iter()
        .map(|address| {
            let provider = Arc::clone(&provider);
            let limiter = limiter.clone();
            let address = address.as_str().to_string();

            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                tracing::debug!("Looking up {}", address);
                provider.lookup(&address).await.and_then(require_ip)
            })
        })
        .collect();

    let mut slots = Vec::with_capacity(handles.len());
    for (handle, address) in handles.into_iter().zip(addresses) {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(join_error) => Err(LocateError::TaskFailed {
                message: join_error.to_string(),
            }),
        };

        slots.push(outcome.map_err(|e| {
            tracing::warn!("Lookup failed for {}: {}", address, e);
            LookupError::new(address.as_str(), e.to_string())
        }));
    }

    LookupSlots::new(slots)
}

/// Resolves the caller's own public address.
pub async fn lookup_self<P>(provider: &P) -> Result<LookupResult>
where
    P: GeoProvider + ?Sized,
{
    tracing::debug!("Looking up own public address");
    provider.lookup_self().await.and_then(require_ip)
}

fn require_ip(result: LookupResult) -> Result<LookupResult> {
    if result.ip.trim().is_empty() {
        return Err(LocateError::EmptyResponse);
    }
    Ok(result)
}
