use crate::core::aggregator::{aggregate, ensure_public};
use crate::core::classifier::{classify, validate};
use crate::core::lookup::{lookup_many, lookup_self};
use crate::core::{BatchOutcome, ConfigProvider, GeoProvider, LookupResult};
use crate::utils::error::{LocateError, Result};
use std::sync::Arc;

pub const DEFAULT_MAX_ADDRESSES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Upper bound on addresses per batch; one task is spawned per address.
    pub max_addresses: usize,
    pub concurrency_limit: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_addresses: DEFAULT_MAX_ADDRESSES,
            concurrency_limit: None,
        }
    }
}

impl BatchOptions {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            max_addresses: config.max_addresses(),
            concurrency_limit: config.concurrency_limit(),
        }
    }
}

/// Runs a batch end to end: validate, classify, look up, aggregate.
///
/// Holds no batch state; every call hands back its own `BatchOutcome`.
pub struct Locator<P: GeoProvider + ?Sized> {
    provider: Arc<P>,
    options: BatchOptions,
}

impl<P: GeoProvider + ?Sized + 'static> Locator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_options(provider, BatchOptions::default())
    }

    pub fn with_options(provider: Arc<P>, options: BatchOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub async fn locate<S: AsRef<str>>(&self, raw: &[S]) -> Result<BatchOutcome> {
        if raw.is_empty() {
            return Err(LocateError::NoAddresses);
        }
        if raw.len() > self.options.max_addresses {
            return Err(LocateError::BatchTooLarge {
                count: raw.len(),
                limit: self.options.max_addresses,
            });
        }

        let addresses = validate(raw)?;
        let classification = classify(&addresses);
        for address in &classification.private {
            tracing::info!("Skipping private address {}", address);
        }
        ensure_public(&classification)?;

        tracing::info!(
            "Looking up {} public addresses",
            classification.public.len()
        );
        let slots = lookup_many(
            Arc::clone(&self.provider),
            &classification.public,
            self.options.concurrency_limit,
        )
        .await;

        aggregate(slots, &classification.private)
    }

    pub async fn locate_self(&self) -> Result<LookupResult> {
        lookup_self(self.provider.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lookup::tests::MockProvider;
    use crate::core::OutcomeStatus;

    #[tokio::test]
    async fn test_private_addresses_never_reach_provider() {
        let provider = Arc::new(MockProvider::default());
        let locator = Locator::new(provider.clone());

        let outcome = locator.locate(&["8.8.8.8", "10.0.0.5"]).await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].ip, "8.8.8.8");
        assert_eq!(outcome.excluded, vec!["10.0.0.5"]);
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_literal_stops_before_lookup() {
        let provider = Arc::new(MockProvider::default());
        let locator = Locator::new(provider.clone());

        let err = locator.locate(&["8.8.8.8", "not-an-ip"]).await.unwrap_err();

        assert!(matches!(err, LocateError::InvalidFormat { ref address } if address == "not-an-ip"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_private_short_circuits() {
        let provider = Arc::new(MockProvider::default());
        let locator = Locator::new(provider.clone());

        let err = locator.locate(&["10.0.0.1"]).await.unwrap_err();

        assert!(matches!(err, LocateError::AllPrivate { .. }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_one_failure_is_a_warning() {
        let provider = Arc::new(MockProvider::failing("9.9.9.9", "HTTP 500"));
        let locator = Locator::new(provider);

        let outcome = locator.locate(&["9.9.9.9", "8.8.8.8"]).await.unwrap();

        assert_eq!(outcome.status(), OutcomeStatus::SuccessWithWarnings);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.error_messages().len(), 1);
        assert!(outcome.error_messages()[0].starts_with("Error looking up 9.9.9.9:"));
    }

    #[tokio::test]
    async fn test_every_failure_escalates() {
        let provider = Arc::new(MockProvider::failing("8.8.8.8", "HTTP 500"));
        let locator = Locator::new(provider);

        let err = locator.locate(&["8.8.8.8", "127.0.0.1"]).await.unwrap_err();
        assert!(matches!(err, LocateError::NoSuccessfulResults { ref errors } if errors.len() == 1));
    }

    #[tokio::test]
    async fn test_batch_bounds() {
        let provider = Arc::new(MockProvider::default());
        let locator = Locator::with_options(
            provider.clone(),
            BatchOptions {
                max_addresses: 2,
                concurrency_limit: Some(1),
            },
        );

        let empty: [&str; 0] = [];
        assert!(matches!(
            locator.locate(&empty).await,
            Err(LocateError::NoAddresses)
        ));
        assert!(matches!(
            locator.locate(&["1.1.1.1", "8.8.8.8", "9.9.9.9"]).await,
            Err(LocateError::BatchTooLarge { count: 3, limit: 2 })
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_every_address_is_accounted_for() {
        let provider = Arc::new(MockProvider::failing("1.1.1.1", "boom"));
        let locator = Locator::new(provider);
        let input = ["8.8.8.8", "1.1.1.1", "192.168.1.10", "::1", "9.9.9.9"];

        let outcome = locator.locate(&input).await.unwrap();

        assert_eq!(outcome.total(), input.len());
    }

    #[tokio::test]
    async fn test_locate_self() {
        let provider = Arc::new(MockProvider {
            self_result: Some(crate::core::LookupResult::new("203.0.113.9")),
            ..Default::default()
        });
        let locator = Locator::new(provider);
        assert_eq!(locator.locate_self().await.unwrap().ip, "203.0.113.9");
    }
}
