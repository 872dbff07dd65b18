use crate::adapters::iplocate::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::export::OutputFormat;
use crate::core::locator::DEFAULT_MAX_ADDRESSES;
use crate::core::ConfigProvider;
use crate::utils::error::{LocateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Semaphore;

/// Optional settings file, e.g.
///
/// ```toml
/// [provider]
/// api_key = "${IPLOCATE_API_KEY}"
/// timeout_seconds = 5
///
/// [batch]
/// max_addresses = 50
/// concurrency_limit = 8
///
/// [output]
/// format = "json"
/// path = "results.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub batch: BatchSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSection {
    pub max_addresses: Option<usize>,
    pub concurrency_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LocateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IPLOCATE_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| LocateError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        self.provider.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn api_key(&self) -> Option<&str> {
        self.provider.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.provider
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn max_addresses(&self) -> usize {
        self.batch.max_addresses.unwrap_or(DEFAULT_MAX_ADDRESSES)
    }

    fn concurrency_limit(&self) -> Option<usize> {
        self.batch.concurrency_limit
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("provider.endpoint", self.endpoint())?;
        validation::validate_range("provider.timeout_seconds", self.timeout_seconds(), 1, 300)?;
        validation::validate_positive_number("batch.max_addresses", self.max_addresses(), 1)?;

        if let Some(limit) = self.batch.concurrency_limit {
            validation::validate_range(
                "batch.concurrency_limit",
                limit,
                1,
                Semaphore::MAX_PERMITS,
            )?;
        }
        if let Some(key) = &self.provider.api_key {
            validation::validate_resolved("provider.api_key", key)?;
        }
        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }
}
