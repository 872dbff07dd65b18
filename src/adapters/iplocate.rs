use crate::core::{ConfigProvider, GeoProvider, LookupResult};
use crate::utils::error::{LocateError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://iplocate.io/api/lookup";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const API_KEY_ENV: &str = "IPLOCATE_API_KEY";

/// HTTP client for the iplocate.io lookup API.
///
/// `GET {endpoint}/{ip}` looks up one address and `GET {endpoint}/` resolves
/// the caller. The key travels in the `X-API-Key` header.
#[derive(Debug, Clone)]
pub struct IpLocateClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl IpLocateClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("iplocator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LocateError::MissingConfigError {
                field: API_KEY_ENV.to_string(),
            })?;

        Self::new(
            config.endpoint(),
            api_key,
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    async fn fetch(&self, url: &str) -> Result<LookupResult> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .header("X-API-Key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        parse_response(response).await
    }
}

async fn parse_response(response: Response) -> Result<LookupResult> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let fallback = status.canonical_reason().unwrap_or("unknown error");
        return Err(LocateError::ProviderStatus {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
        });
    }

    if body.trim().is_empty() {
        return Err(LocateError::EmptyResponse);
    }

    Ok(serde_json::from_str(&body)?)
}

// iplocate reports failures as {"error": "..."}
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string)
}

#[async_trait]
impl GeoProvider for IpLocateClient {
    async fn lookup(&self, address: &str) -> Result<LookupResult> {
        self.fetch(&format!("{}/{}", self.endpoint, address)).await
    }

    async fn lookup_self(&self) -> Result<LookupResult> {
        self.fetch(&format!("{}/", self.endpoint)).await
    }
}
