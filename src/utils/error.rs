use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("invalid IP format: {address}")]
    InvalidFormat { address: String },

    #[error("all addresses are private/local: {}", .addresses.join(", "))]
    AllPrivate { addresses: Vec<String> },

    #[error("no IP addresses provided")]
    NoAddresses,

    #[error("batch of {count} addresses exceeds the limit of {limit}")]
    BatchTooLarge { count: usize, limit: usize },

    #[error("no results found")]
    NoSuccessfulResults { errors: Vec<String> },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {message}")]
    ProviderStatus { status: u16, message: String },

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("lookup task failed: {message}")]
    TaskFailed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{message}")]
    ConflictingInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Provider,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl LocateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LocateError::InvalidFormat { .. }
            | LocateError::AllPrivate { .. }
            | LocateError::NoAddresses
            | LocateError::BatchTooLarge { .. }
            | LocateError::ConflictingInput { .. } => ErrorCategory::Input,
            LocateError::NoSuccessfulResults { .. }
            | LocateError::ApiError(_)
            | LocateError::ProviderStatus { .. }
            | LocateError::EmptyResponse
            | LocateError::TaskFailed { .. } => ErrorCategory::Provider,
            LocateError::IoError(_) | LocateError::SerializationError(_) => ErrorCategory::Io,
            LocateError::ConfigError { .. }
            | LocateError::MissingConfigError { .. }
            | LocateError::InvalidConfigValueError { .. }
            | LocateError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LocateError::NoSuccessfulResults { errors } if !errors.is_empty() => {
                format!("No results found ({} lookups failed)", errors.len())
            }
            LocateError::ApiError(e) if e.is_timeout() => {
                "The geolocation provider did not answer in time".to_string()
            }
            LocateError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LocateError::InvalidFormat { .. } => {
                "Check that every entry is a plain IPv4 or IPv6 address"
            }
            LocateError::AllPrivate { .. } => {
                "Private and loopback addresses cannot be geolocated; provide a public address"
            }
            LocateError::NoAddresses => "Pass addresses as arguments, use --file, or use --self",
            LocateError::BatchTooLarge { .. } => {
                "Split the input into smaller batches or raise --max-addresses"
            }
            LocateError::ConflictingInput { .. } => {
                "Use --self on its own, without other addresses or --file"
            }
            LocateError::NoSuccessfulResults { .. }
            | LocateError::ApiError(_)
            | LocateError::EmptyResponse
            | LocateError::TaskFailed { .. } => "Retry the lookup later",
            LocateError::ProviderStatus { status, .. } => match status {
                401 | 403 => "Check the IPLOCATE_API_KEY value",
                429 => "The provider rate limit was hit; wait before retrying",
                _ => "Retry the lookup later",
            },
            LocateError::IoError(_) => "Check that the file exists and is readable",
            LocateError::SerializationError(_) => "Report this issue with the offending result",
            LocateError::MissingConfigError { .. } => {
                "Set IPLOCATE_API_KEY or pass --api-key"
            }
            LocateError::ConfigError { .. }
            | LocateError::InvalidConfigValueError { .. }
            | LocateError::ConfigValidationError { .. } => {
                "Review the command line flags and configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LocateError>;
