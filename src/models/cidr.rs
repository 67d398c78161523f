//! CIDR address-block utilities.
//!
//! Provides the [`Cidr`] struct for representing IPv4 and IPv6 address blocks
//! in CIDR notation, along with the bit arithmetic the subnet calculations
//! are built on.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use thiserror::Error;

/// Maximum prefix length for an IPv4 block (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for an IPv6 block (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Errors produced by CIDR parsing and subnet derivation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CidrError {
    /// The input string is not valid CIDR notation.
    #[error("invalid CIDR `{input}`: {reason}")]
    InvalidCidr { input: String, reason: String },

    /// The requested subnet count does not fit in the address family.
    #[error("cannot carve {requested} subnets out of {cidr}: address space exhausted")]
    AddressSpaceExhausted { cidr: String, requested: u32 },
}

impl CidrError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> CidrError {
        CidrError::InvalidCidr {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Address bits widened to u128 so IPv4 and IPv6 share one code path.
pub fn addr_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

/// Rebuild an address of the given family from its bit value.
pub fn bits_to_addr(bits: u128, v4: bool) -> IpAddr {
    if v4 {
        IpAddr::V4(Ipv4Addr::from(bits as u32))
    } else {
        IpAddr::V6(Ipv6Addr::from(bits))
    }
}

/// An IPv4 or IPv6 address block in CIDR notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cidr {
    /// The block's address.
    pub addr: IpAddr,
    /// The prefix length (0-32 for IPv4, 0-128 for IPv6).
    pub prefix: u8,
}

impl Cidr {
    /// Create a new [`Cidr`] from a string (e.g., "10.0.0.0/16").
    pub fn new(input: &str) -> Result<Cidr, CidrError> {
        let input = input.trim();
        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() != 2 {
            return Err(CidrError::invalid(input, "expected address/prefix"));
        }
        let addr: IpAddr = parts[0]
            .parse()
            .map_err(|_| CidrError::invalid(input, format!("bad address `{}`", parts[0])))?;
        let prefix: u8 = parts[1]
            .parse()
            .map_err(|_| CidrError::invalid(input, format!("bad prefix `{}`", parts[1])))?;
        let cidr = Cidr { addr, prefix };
        if prefix > cidr.family_bits() {
            return Err(CidrError::invalid(
                input,
                format!("prefix /{prefix} exceeds /{}", cidr.family_bits()),
            ));
        }
        Ok(cidr)
    }

    /// Address width of this block's family: 32 or 128.
    pub fn family_bits(&self) -> u8 {
        match self.addr {
            IpAddr::V4(_) => MAX_LENGTH_V4,
            IpAddr::V6(_) => MAX_LENGTH_V6,
        }
    }

    /// This block with its host bits cleared.
    pub fn network(&self) -> Cidr {
        let host = self.family_bits() - self.prefix;
        let bits = if host >= 128 {
            0
        } else {
            (addr_bits(self.addr) >> host) << host
        };
        Cidr {
            addr: bits_to_addr(bits, self.addr.is_ipv4()),
            prefix: self.prefix,
        }
    }

    /// The lowest address in the block.
    pub fn lo(&self) -> IpAddr {
        self.network().addr
    }

    /// The highest address in the block.
    pub fn hi(&self) -> IpAddr {
        let host = self.family_bits() - self.prefix;
        let mask = if host >= 128 { u128::MAX } else { (1u128 << host) - 1 };
        bits_to_addr(addr_bits(self.network().addr) | mask, self.addr.is_ipv4())
    }

    /// Whether `other` lies entirely within this block.
    pub fn contains(&self, other: &Cidr) -> bool {
        if self.addr.is_ipv4() != other.addr.is_ipv4() {
            return false;
        }
        self.prefix <= other.prefix
            && addr_bits(self.lo()) <= addr_bits(other.lo())
            && addr_bits(other.hi()) <= addr_bits(self.hi())
    }
}

impl FromStr for Cidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Cidr, CidrError> {
        Cidr::new(s)
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cidr::new(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v4() {
        let cidr = Cidr::new("10.0.0.0/16").unwrap();
        assert_eq!(cidr.addr, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)));
        assert_eq!(cidr.prefix, 16);
        assert_eq!(cidr.to_string(), "10.0.0.0/16");
    }

    #[test]
    fn test_parse_v6() {
        let cidr = Cidr::new("fd00::/48").unwrap();
        assert_eq!(cidr.prefix, 48);
        assert_eq!(cidr.family_bits(), 128);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Cidr::new("10.0.0.0"),
            Err(CidrError::InvalidCidr { .. })
        ));
        assert!(matches!(
            Cidr::new("10.0.0.300/16"),
            Err(CidrError::InvalidCidr { .. })
        ));
        assert!(matches!(
            Cidr::new("10.0.0.0/33"),
            Err(CidrError::InvalidCidr { .. })
        ));
        assert!(matches!(
            Cidr::new("fd00::/129"),
            Err(CidrError::InvalidCidr { .. })
        ));
        assert!(matches!(
            Cidr::new("not-a-cidr"),
            Err(CidrError::InvalidCidr { .. })
        ));
    }

    #[test]
    fn test_network_clears_host_bits() {
        let cidr = Cidr::new("192.168.1.42/24").unwrap();
        assert_eq!(cidr.network().to_string(), "192.168.1.0/24");
        let cidr = Cidr::new("192.168.1.42/16").unwrap();
        assert_eq!(cidr.network().to_string(), "192.168.0.0/16");
        let cidr = Cidr::new("192.168.1.42/32").unwrap();
        assert_eq!(cidr.network().to_string(), "192.168.1.42/32");
    }

    #[test]
    fn test_lo_hi() {
        let cidr = Cidr::new("10.0.32.0/19").unwrap();
        assert_eq!(cidr.lo(), IpAddr::V4(Ipv4Addr::new(10, 0, 32, 0)));
        assert_eq!(cidr.hi(), IpAddr::V4(Ipv4Addr::new(10, 0, 63, 255)));
    }

    #[test]
    fn test_contains() {
        let vcn = Cidr::new("10.0.0.0/16").unwrap();
        assert!(vcn.contains(&Cidr::new("10.0.32.0/19").unwrap()));
        assert!(vcn.contains(&vcn));
        assert!(!vcn.contains(&Cidr::new("10.1.0.0/19").unwrap()));
        assert!(!vcn.contains(&Cidr::new("10.0.0.0/8").unwrap()));
        assert!(!vcn.contains(&Cidr::new("fd00::/48").unwrap()));
    }

    #[test]
    fn test_ordering() {
        let a = Cidr::new("10.0.0.0/19").unwrap();
        let b = Cidr::new("10.0.32.0/19").unwrap();
        let c = Cidr::new("10.0.0.0/16").unwrap();
        assert!(a < b);
        assert!(c < a);
    }

    #[test]
    fn test_serde_round_trip() {
        let cidr = Cidr::new("10.0.64.0/19").unwrap();
        let json = serde_json::to_string(&cidr).unwrap();
        assert_eq!(json, "\"10.0.64.0/19\"");
        let back: Cidr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cidr);
    }
}
