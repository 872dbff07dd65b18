use crate::adapters::iplocate::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::config::toml_config::TomlConfig;
use crate::core::export::OutputFormat;
use crate::core::locator::DEFAULT_MAX_ADDRESSES;
use crate::core::ConfigProvider;
use crate::utils::error::{LocateError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "iplocator")]
#[command(about = "Look up geolocation details for one or more IP addresses")]
pub struct CliConfig {
    /// IP addresses to look up
    #[arg(value_name = "IP")]
    pub ips: Vec<String>,

    #[arg(long, help = "Show output in JSON format")]
    pub json: bool,

    #[arg(long = "self", help = "Lookup your own IP")]
    pub self_lookup: bool,

    #[arg(long, help = "Path to a file with IPs (one per line)")]
    pub file: Option<String>,

    #[arg(long, help = "Path to a TOML settings file")]
    pub config: Option<String>,

    #[arg(long, env = "IPLOCATE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Lookup API base URL")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Refuse batches larger than this")]
    pub max_addresses: Option<usize>,

    #[arg(long, help = "Maximum lookups in flight at once")]
    pub concurrency: Option<usize>,

    #[arg(long, help = "Also write the results to this file")]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(skip)]
    file_format: Option<OutputFormat>,
}

impl CliConfig {
    /// Fills every setting the command line left open from the settings file.
    pub fn with_file_defaults(mut self, file: &TomlConfig) -> Self {
        self.api_key = self.api_key.or_else(|| file.provider.api_key.clone());
        self.endpoint = self.endpoint.or_else(|| file.provider.endpoint.clone());
        self.timeout_seconds = self.timeout_seconds.or(file.provider.timeout_seconds);
        self.max_addresses = self.max_addresses.or(file.batch.max_addresses);
        self.concurrency = self.concurrency.or(file.batch.concurrency_limit);
        self.output = self.output.or_else(|| file.output.path.clone());
        self.file_format = file.output.format;
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.file_format.unwrap_or_default()
        }
    }
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn max_addresses(&self) -> usize {
        self.max_addresses.unwrap_or(DEFAULT_MAX_ADDRESSES)
    }

    fn concurrency_limit(&self) -> Option<usize> {
        self.concurrency
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.self_lookup && (!self.ips.is_empty() || self.file.is_some()) {
            return Err(LocateError::ConflictingInput {
                message: "--self cannot be used with other IPs or --file".to_string(),
            });
        }

        validation::validate_url("endpoint", self.endpoint())?;
        validation::validate_range("timeout_seconds", self.timeout_seconds(), 1, 300)?;
        validation::validate_positive_number("max_addresses", self.max_addresses(), 1)?;

        if let Some(limit) = self.concurrency {
            validation::validate_range("concurrency", limit, 1, Semaphore::MAX_PERMITS)?;
        }
        if let Some(key) = &self.api_key {
            validation::validate_non_empty_string("api_key", key)?;
            validation::validate_resolved("api_key", key)?;
        }
        if let Some(path) = &self.file {
            validation::validate_path("file", path)?;
        }
        if let Some(path) = &self.output {
            validation::validate_path("output", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::try_parse_from([
            "iplocator",
            "--json",
            "--file",
            "ips.txt",
            "--concurrency",
            "4",
            "8.8.8.8",
            "1.1.1.1",
        ])
        .unwrap();

        assert!(config.json);
        assert_eq!(config.file.as_deref(), Some("ips.txt"));
        assert_eq!(config.ips, vec!["8.8.8.8", "1.1.1.1"]);
        assert_eq!(config.concurrency_limit(), Some(4));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_self_conflicts_with_addresses() {
        let config = CliConfig::try_parse_from(["iplocator", "--self", "8.8.8.8"]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(LocateError::ConflictingInput { .. })
        ));

        let config = CliConfig::try_parse_from(["iplocator", "--self"]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[provider]
endpoint = "http://file.example/api/lookup"
timeout_seconds = 7

[batch]
max_addresses = 3

[output]
format = "json"
"#,
        )
        .unwrap();

        let config = CliConfig {
            timeout_seconds: Some(2),
            ..Default::default()
        }
        .with_file_defaults(&file);

        assert_eq!(config.endpoint(), "http://file.example/api/lookup");
        assert_eq!(config.timeout_seconds(), 2);
        assert_eq!(config.max_addresses(), 3);
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = CliConfig {
            concurrency: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_concurrency_rejected() {
        let config = CliConfig {
            concurrency: Some(usize::MAX),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            concurrency: Some(Semaphore::MAX_PERMITS),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_command_line_key_replaces_unresolved_file_key() {
        let file = TomlConfig::from_toml_str(
            r#"
[provider]
api_key = "${IPLOCATOR_SURELY_UNSET_VARIABLE}"
"#,
        )
        .unwrap();

        let config = CliConfig {
            api_key: Some("real-key".to_string()),
            ..Default::default()
        }
        .with_file_defaults(&file);
        assert_eq!(config.api_key(), Some("real-key"));
        assert!(config.validate().is_ok());

        let config = CliConfig::default().with_file_defaults(&file);
        assert!(matches!(
            config.validate(),
            Err(LocateError::ConfigValidationError { .. })
        ));
    }
}
