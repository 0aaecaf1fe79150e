//! Address parsing for IP list entries.

use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;

use crate::error::AddressError;

/// An address with its prefix length, in the form stored on the wire.
///
/// The address bytes are in network order and are not masked to the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cidr {
    /// 4 bytes for IPv4, 16 bytes for IPv6
    pub ip: Vec<u8>,
    pub prefix: u32,
}

impl Cidr {
    /// Get the address back as an `IpAddr`.
    pub fn addr(&self) -> Option<IpAddr> {
        match self.ip.len() {
            4 => {
                let octets: [u8; 4] = self.ip.as_slice().try_into().ok()?;
                Some(IpAddr::from(octets))
            }
            16 => {
                let octets: [u8; 16] = self.ip.as_slice().try_into().ok()?;
                Some(IpAddr::from(octets))
            }
            _ => None,
        }
    }

    /// Convert to an `IpNet`, keeping host bits as written.
    pub fn to_net(&self) -> Option<IpNet> {
        let prefix = u8::try_from(self.prefix).ok()?;
        IpNet::new(self.addr()?, prefix).ok()
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_net() {
            Some(net) => write!(f, "{}", net),
            None => write!(f, "<invalid {} bytes>/{}", self.ip.len(), self.prefix),
        }
    }
}

/// Parse `addr` or `addr/prefix` into a [`Cidr`].
///
/// A missing or empty prefix defaults to the full width of the address
/// family. Bracketed IPv6 literals are accepted and IPv4-mapped IPv6
/// addresses collapse to their 4-byte form.
pub fn parse_cidr(s: &str) -> Result<Cidr, AddressError> {
    let (addr, mask) = match s.split_once('/') {
        Some((addr, mask)) => (addr, mask),
        None => (s, ""),
    };

    let ip = parse_addr(addr).ok_or_else(|| AddressError::Unsupported(s.to_string()))?;
    let (bytes, width) = match ip {
        IpAddr::V4(v4) => (v4.octets().to_vec(), 32),
        IpAddr::V6(v6) => (v6.octets().to_vec(), 128),
    };

    let prefix = if mask.is_empty() {
        width
    } else {
        parse_mask(mask)?
    };
    if prefix > width {
        return Err(AddressError::InvalidMask(format!("{} > {}", prefix, width)));
    }

    Ok(Cidr { ip: bytes, prefix })
}

fn parse_addr(addr: &str) -> Option<IpAddr> {
    let addr = addr
        .strip_prefix('[')
        .and_then(|a| a.strip_suffix(']'))
        .unwrap_or(addr)
        .trim();

    match addr.parse::<IpAddr>().ok()? {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => Some(IpAddr::V4(v4)),
            None => Some(IpAddr::V6(v6)),
        },
        v4 => Some(v4),
    }
}

fn parse_mask(mask: &str) -> Result<u32, AddressError> {
    // `u32::from_str` also takes a leading `+`
    if !mask.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::InvalidMask(mask.to_string()));
    }
    mask.parse::<u32>()
        .map_err(|_| AddressError::InvalidMask(mask.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_with_prefix() {
        let cidr = parse_cidr("10.0.0.0/8").unwrap();
        assert_eq!(cidr.ip, vec![10, 0, 0, 0]);
        assert_eq!(cidr.prefix, 8);
    }

    #[test]
    fn test_ipv4_default_prefix() {
        let cidr = parse_cidr("192.168.1.1").unwrap();
        assert_eq!(cidr.ip, vec![192, 168, 1, 1]);
        assert_eq!(cidr.prefix, 32);

        // Trailing slash with nothing after it means full width too
        assert_eq!(parse_cidr("192.168.1.1/").unwrap().prefix, 32);
    }

    #[test]
    fn test_ipv6() {
        let cidr = parse_cidr("2001:db8::/32").unwrap();
        assert_eq!(cidr.ip.len(), 16);
        assert_eq!(&cidr.ip[..4], &[0x20, 0x01, 0x0d, 0xb8]);
        assert!(cidr.ip[4..].iter().all(|b| *b == 0));
        assert_eq!(cidr.prefix, 32);

        assert_eq!(parse_cidr("::1").unwrap().prefix, 128);
        assert_eq!(parse_cidr("[fe80::1]/10").unwrap().prefix, 10);
    }

    #[test]
    fn test_ipv4_mapped_collapses() {
        let cidr = parse_cidr("::ffff:1.2.3.4").unwrap();
        assert_eq!(cidr.ip, vec![1, 2, 3, 4]);
        assert_eq!(cidr.prefix, 32);
    }

    #[test]
    fn test_host_bits_kept() {
        let cidr = parse_cidr("10.1.2.3/8").unwrap();
        assert_eq!(cidr.ip, vec![10, 1, 2, 3]);
        assert_eq!(cidr.to_string(), "10.1.2.3/8");
    }

    #[test]
    fn test_invalid_mask() {
        assert!(matches!(
            parse_cidr("10.0.0.0/33"),
            Err(AddressError::InvalidMask(_))
        ));
        assert!(matches!(
            parse_cidr("2001:db8::/129"),
            Err(AddressError::InvalidMask(_))
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/abc"),
            Err(AddressError::InvalidMask(_))
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/+8"),
            Err(AddressError::InvalidMask(_))
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/-1"),
            Err(AddressError::InvalidMask(_))
        ));
    }

    #[test]
    fn test_unsupported_address() {
        assert!(matches!(
            parse_cidr("bad-address"),
            Err(AddressError::Unsupported(_))
        ));
        assert!(matches!(
            parse_cidr("example.com/24"),
            Err(AddressError::Unsupported(_))
        ));
        assert!(matches!(parse_cidr(""), Err(AddressError::Unsupported(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = parse_cidr("10.0.0.0/40").unwrap_err();
        assert!(err.to_string().contains("invalid network mask"));
        let err = parse_cidr("nope").unwrap_err();
        assert!(err.to_string().contains("unsupported address"));
    }

    #[test]
    fn test_width_invariant() {
        for input in ["0.0.0.0/0", "1.1.1.1", "::/0", "ff00::/8", "127.0.0.1/32"] {
            let cidr = parse_cidr(input).unwrap();
            match cidr.ip.len() {
                4 => assert!(cidr.prefix <= 32),
                16 => assert!(cidr.prefix <= 128),
                n => panic!("unexpected length {}", n),
            }
            assert!(cidr.to_net().is_some());
        }
    }
}
