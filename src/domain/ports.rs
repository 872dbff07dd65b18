use crate::domain::model::LookupResult;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn max_addresses(&self) -> usize;
    fn concurrency_limit(&self) -> Option<usize>;
}

/// Geolocation data source. Every call is a single attempt; timeouts belong
/// to the implementation.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn lookup(&self, address: &str) -> Result<LookupResult>;
    async fn lookup_self(&self) -> Result<LookupResult>;
}
