use crate::core::LookupResult;
use crate::utils::error::Result;

pub const RESULT_SEPARATOR: &str = "---------------";

/// Renders one result as text. A line appears only when its field is present.
pub fn format_one(result: &LookupResult) -> String {
    let mut lines = vec![format!("IP: {}", result.ip)];

    if let Some(country) = &result.country {
        match &result.country_code {
            Some(code) => lines.push(format!("Country: {} ({})", country, code)),
            None => lines.push(format!("Country: {}", country)),
        }
    }
    if let Some(city) = &result.city {
        lines.push(format!("City: {}", city));
    }
    if let Some((latitude, longitude)) = result.coordinates() {
        lines.push(format!("Coordinates: {:.4}, {:.4}", latitude, longitude));
    }
    if let Some(time_zone) = &result.time_zone {
        lines.push(format!("Time Zone: {}", time_zone));
    }
    if let Some(asn) = &result.asn {
        lines.push(format!("ISP: {} (ASN {})", asn.name, asn.asn));
    }

    let privacy = &result.privacy;
    if privacy.is_vpn {
        lines.push("Uses VPN: Yes".to_string());
    }
    if privacy.is_proxy {
        lines.push("Uses Proxy: Yes".to_string());
    }
    if !privacy.is_vpn && !privacy.is_proxy {
        lines.push("Privacy: No VPN or Proxy detected".to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Text blocks for every result, each followed by a separator line.
pub fn format_text_list(results: &[LookupResult]) -> String {
    results
        .iter()
        .map(|result| format!("{}{}\n", format_one(result), RESULT_SEPARATOR))
        .collect()
}

/// Canonical JSON document for a result collection: a 2-space indented array
/// with `null` for every absent field.
pub fn format_many(results: &[LookupResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
