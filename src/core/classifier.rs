use crate::core::{Address, AddressClass, Classification};
use crate::utils::error::{LocateError, Result};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Parses every literal, failing on the first malformed one.
pub fn validate<S: AsRef<str>>(addresses: &[S]) -> Result<Vec<Address>> {
    addresses
        .iter()
        .map(|raw| {
            let literal = raw.as_ref();
            let ip: IpAddr = literal.parse().map_err(|_| LocateError::InvalidFormat {
                address: literal.to_string(),
            })?;
            Ok(Address::new(literal.to_string(), ip, class_of(ip)))
        })
        .collect()
}

/// Splits addresses into public and private, keeping input order in each half.
pub fn classify(addresses: &[Address]) -> Classification {
    let (private, public): (Vec<Address>, Vec<Address>) =
        addresses.iter().cloned().partition(Address::is_private);
    Classification { public, private }
}

pub fn class_of(ip: IpAddr) -> AddressClass {
    let private = match ip {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_private_v4(v4),
            None => is_private_v6(v6),
        },
    };

    if private {
        AddressClass::Private
    } else {
        AddressClass::Public
    }
}

// 127/8, 10/8, 172.16/12, 192.168/16 only; 169.254/16 and 100.64/10 stay public
fn is_private_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private()
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    ip.is_loopback() || (ip.segments()[0] & 0xffc0) == 0xfe80
}
