use crate::core::formatter::{format_many, format_text_list};
use crate::core::{BatchOutcome, Storage};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Same rendering the terminal gets.
pub fn render(outcome: &BatchOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text_list(&outcome.results)),
        OutputFormat::Json => format_many(&outcome.results),
    }
}

pub async fn export_outcome<S: Storage>(
    storage: &S,
    path: &str,
    format: OutputFormat,
    outcome: &BatchOutcome,
) -> Result<()> {
    let body = render(outcome, format)?;
    tracing::debug!("Writing {} bytes of {:?} output to {}", body.len(), format, path);
    storage.write_file(path, body.as_bytes()).await
}

/// e.g. `iplocate-results-20261019-142501.json`
pub fn default_export_name(format: OutputFormat) -> String {
    format!(
        "iplocate-results-{}.{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}
