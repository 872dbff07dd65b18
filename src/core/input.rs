use crate::core::Storage;
use crate::utils::error::Result;

/// One candidate address per line, trimmed; blank lines are skipped.
pub fn parse_address_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn read_address_file<S: Storage>(storage: &S, path: &str) -> Result<Vec<String>> {
    let bytes = storage.read_file(path).await?;
    let content = String::from_utf8_lossy(&bytes);
    let addresses = parse_address_lines(&content);
    tracing::debug!("Read {} addresses from {}", addresses.len(), path);
    Ok(addresses)
}

/// File addresses come first, then the ones given directly.
pub async fn collect_addresses<S: Storage>(
    storage: &S,
    file: Option<&str>,
    direct: &[String],
) -> Result<Vec<String>> {
    let mut addresses = match file {
        Some(path) => read_address_file(storage, path).await?,
        None => Vec::new(),
    };
    addresses.extend(direct.iter().cloned());
    Ok(addresses)
}
