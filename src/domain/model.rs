use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    Public,
    Private,
}

/// A validated IP literal together with its classification.
///
/// Only built by `core::classifier::validate`, so `literal` always parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    literal: String,
    ip: IpAddr,
    class: AddressClass,
}

impl Address {
    pub(crate) fn new(literal: String, ip: IpAddr, class: AddressClass) -> Self {
        Self { literal, ip, class }
    }

    pub fn as_str(&self) -> &str {
        &self.literal
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn class(&self) -> AddressClass {
        self.class
    }

    pub fn is_private(&self) -> bool {
        self.class == AddressClass::Private
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub public: Vec<Address>,
    pub private: Vec<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsnInfo {
    /// AS number as reported by the provider, e.g. `AS15169`
    pub asn: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub netname: Option<String>,
    /// Network owner
    pub name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub rir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivacyInfo {
    #[serde(default)]
    pub is_abuser: bool,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub is_bogon: bool,
    #[serde(default)]
    pub is_hosting: bool,
    #[serde(default)]
    pub is_icloud_relay: bool,
    #[serde(default)]
    pub is_proxy: bool,
    #[serde(default)]
    pub is_tor: bool,
    #[serde(default)]
    pub is_vpn: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Hosting or cloud provider owning the address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostingInfo {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

/// Abuse contact for the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbuseInfo {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Provider response for one address.
///
/// Optional fields serialize as `null` when absent so exported JSON keeps
/// the provider's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub ip: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub is_eu: Option<bool>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub subdivision: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub calling_code: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub asn: Option<AsnInfo>,
    #[serde(default)]
    pub privacy: PrivacyInfo,
    #[serde(default)]
    pub company: Option<CompanyInfo>,
    #[serde(default)]
    pub hosting: Option<HostingInfo>,
    #[serde(default)]
    pub abuse: Option<AbuseInfo>,
}

impl LookupResult {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Default::default()
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupError {
    pub address: String,
    pub reason: String,
}

impl LookupError {
    pub fn new(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error looking up {}: {}", self.address, self.reason)
    }
}

/// Per-address outcome of a batch, one slot per requested address in input order.
#[derive(Debug, Clone)]
pub struct LookupSlots {
    slots: Vec<std::result::Result<LookupResult, LookupError>>,
}

impl LookupSlots {
    pub fn new(slots: Vec<std::result::Result<LookupResult, LookupError>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn results(&self) -> Vec<Option<&LookupResult>> {
        self.slots.iter().map(|slot| slot.as_ref().ok()).collect()
    }

    pub fn errors(&self) -> Vec<Option<&LookupError>> {
        self.slots.iter().map(|slot| slot.as_ref().err()).collect()
    }

    pub fn into_inner(self) -> Vec<std::result::Result<LookupResult, LookupError>> {
        self.slots
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    SuccessWithWarnings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub results: Vec<LookupResult>,
    pub errors: Vec<LookupError>,
    pub excluded: Vec<String>,
}

impl BatchOutcome {
    pub fn status(&self) -> OutcomeStatus {
        if self.errors.is_empty() {
            OutcomeStatus::Success
        } else {
            OutcomeStatus::SuccessWithWarnings
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Number of input addresses this outcome accounts for.
    pub fn total(&self) -> usize {
        self.results.len() + self.errors.len() + self.excluded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::new("8.8.8.8", "timeout");
        assert_eq!(err.to_string(), "Error looking up 8.8.8.8: timeout");
    }

    #[test]
    fn test_slots_views_are_complementary() {
        let slots = LookupSlots::new(vec![
            Ok(LookupResult::new("1.1.1.1")),
            Err(LookupError::new("8.8.8.8", "boom")),
        ]);

        let results = slots.results();
        let errors = slots.errors();
        assert_eq!(results.len(), 2);
        assert_eq!(errors.len(), 2);
        for i in 0..slots.len() {
            assert!(results[i].is_some() != errors[i].is_some());
        }
    }

    #[test]
    fn test_deserialize_provider_shape() {
        let body = serde_json::json!({
            "ip": "8.8.8.8",
            "country": "United States",
            "country_code": "US",
            "city": null,
            "latitude": 37.751,
            "longitude": -97.822,
            "time_zone": "America/Chicago",
            "asn": {"asn": "AS15169", "name": "GOOGLE", "route": "8.8.8.0/24"},
            "privacy": {"is_vpn": false, "is_proxy": false, "is_tor": false},
            "company": {"name": "Google LLC"}
        });

        let result: LookupResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.country_code.as_deref(), Some("US"));
        assert!(result.city.is_none());
        assert_eq!(result.coordinates(), Some((37.751, -97.822)));
        let asn = result.asn.unwrap();
        assert_eq!(asn.asn, "AS15169");
        assert_eq!(asn.route.as_deref(), Some("8.8.8.0/24"));
        assert_eq!(result.company.unwrap().name.as_deref(), Some("Google LLC"));
        assert!(result.abuse.is_none());
    }

    #[test]
    fn test_outcome_status() {
        let mut outcome = BatchOutcome {
            results: vec![LookupResult::new("1.1.1.1")],
            errors: vec![],
            excluded: vec!["10.0.0.1".to_string()],
        };
        assert_eq!(outcome.status(), OutcomeStatus::Success);
        assert_eq!(outcome.total(), 2);

        outcome.errors.push(LookupError::new("8.8.8.8", "boom"));
        assert_eq!(outcome.status(), OutcomeStatus::SuccessWithWarnings);
        assert_eq!(
            outcome.error_messages(),
            vec!["Error looking up 8.8.8.8: boom".to_string()]
        );
    }
}
