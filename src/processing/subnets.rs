//! Uniform subnet calculation.
//!
//! Carves a parent address block into equal-sized subnets using the smallest
//! prefix extension that yields at least the requested count.

use crate::models::{addr_bits, bits_to_addr, Cidr, CidrError};

/// Number of subnets a prefix extension yields, saturating well past any
/// representable request.
fn subnets_at(prefix: u8, parent_prefix: u8) -> u64 {
    let diff = prefix - parent_prefix;
    if diff >= 63 {
        u64::MAX
    } else {
        1u64 << diff
    }
}

/// Split `cidr` into at least `count` equal subnets and return the first
/// `count` of them in ascending address order.
///
/// The chosen prefix is the smallest `p >= cidr.prefix` with
/// `2^(p - cidr.prefix) >= count`, so each subnet is as large as possible.
/// The result exactly partitions the leading sub-range of the parent block;
/// leftover subnets past `count` are discarded.
///
/// `count == 0` returns an empty list. A count that cannot be satisfied
/// within the address family (prefix would pass /32 or /128) fails with
/// [`CidrError::AddressSpaceExhausted`] and no partial output.
///
/// # Examples
/// ```
/// use oci_oke_stack::models::Cidr;
/// use oci_oke_stack::processing::calculate_subnets;
///
/// let vcn = Cidr::new("10.0.0.0/16").unwrap();
/// let subnets = calculate_subnets(vcn, 6).unwrap();
/// assert_eq!(subnets[0].to_string(), "10.0.0.0/19");
/// assert_eq!(subnets[5].to_string(), "10.0.160.0/19");
/// ```
pub fn calculate_subnets(cidr: Cidr, count: u32) -> Result<Vec<Cidr>, CidrError> {
    let supernet = cidr.network();
    let family_bits = supernet.family_bits();

    let mut new_prefix = supernet.prefix;
    while subnets_at(new_prefix, supernet.prefix) < u64::from(count) {
        if new_prefix >= family_bits {
            return Err(CidrError::AddressSpaceExhausted {
                cidr: supernet.to_string(),
                requested: count,
            });
        }
        new_prefix += 1;
    }

    // No extension needed: the parent itself is the only subnet.
    if new_prefix == supernet.prefix {
        return Ok(std::iter::repeat(supernet).take(count.min(1) as usize).collect());
    }

    let base = addr_bits(supernet.addr);
    let step = 1u128 << (family_bits - new_prefix);
    let v4 = supernet.addr.is_ipv4();

    let subnets = (0..u128::from(count))
        .map(|i| Cidr {
            addr: bits_to_addr(base + i * step, v4),
            prefix: new_prefix,
        })
        .collect();

    Ok(subnets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidrs(list: &[Cidr]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_six_subnets_from_slash_16() {
        let vcn = Cidr::new("10.0.0.0/16").unwrap();
        let subnets = calculate_subnets(vcn, 6).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec![
                "10.0.0.0/19",
                "10.0.32.0/19",
                "10.0.64.0/19",
                "10.0.96.0/19",
                "10.0.128.0/19",
                "10.0.160.0/19",
            ]
        );
    }

    #[test]
    fn test_single_subnet_is_parent() {
        let vcn = Cidr::new("10.0.0.0/16").unwrap();
        let subnets = calculate_subnets(vcn, 1).unwrap();
        assert_eq!(cidrs(&subnets), vec!["10.0.0.0/16"]);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let vcn = Cidr::new("10.0.0.0/16").unwrap();
        assert!(calculate_subnets(vcn, 0).unwrap().is_empty());
    }

    #[test]
    fn test_exact_power_of_two() {
        let vcn = Cidr::new("10.0.0.0/16").unwrap();
        let subnets = calculate_subnets(vcn, 4).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec!["10.0.0.0/18", "10.0.64.0/18", "10.0.128.0/18", "10.0.192.0/18"]
        );
    }

    #[test]
    fn test_exhausts_slash_30() {
        let vcn = Cidr::new("10.0.0.0/30").unwrap();
        let err = calculate_subnets(vcn, 8).unwrap_err();
        assert_eq!(
            err,
            CidrError::AddressSpaceExhausted {
                cidr: "10.0.0.0/30".to_string(),
                requested: 8,
            }
        );
    }

    #[test]
    fn test_slash_30_boundary() {
        let vcn = Cidr::new("10.0.0.0/30").unwrap();
        // Four /32 hosts still fit.
        let subnets = calculate_subnets(vcn, 4).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec!["10.0.0.0/32", "10.0.0.1/32", "10.0.0.2/32", "10.0.0.3/32"]
        );
        assert!(calculate_subnets(vcn, 5).is_err());
    }

    #[test]
    fn test_host_bits_ignored() {
        let vcn = Cidr::new("10.0.13.7/16").unwrap();
        let subnets = calculate_subnets(vcn, 2).unwrap();
        assert_eq!(cidrs(&subnets), vec!["10.0.0.0/17", "10.0.128.0/17"]);
    }

    #[test]
    fn test_properties_hold() {
        let vcn = Cidr::new("172.16.0.0/12").unwrap();
        for count in [1u32, 2, 3, 5, 6, 9, 17, 100] {
            let subnets = calculate_subnets(vcn, count).unwrap();
            assert_eq!(subnets.len(), count as usize);
            let prefix = subnets[0].prefix;
            for w in subnets.windows(2) {
                assert_eq!(w[1].prefix, prefix, "uniform prefix for count={count}");
                assert!(w[0] < w[1], "ascending order for count={count}");
                assert!(
                    addr_bits(w[0].hi()) < addr_bits(w[1].lo()),
                    "non-overlapping for count={count}"
                );
            }
            for s in &subnets {
                assert!(vcn.contains(s), "containment for count={count}");
            }
            // Minimum extension: one bit fewer would not fit the count.
            if prefix > vcn.prefix {
                assert!(1u64 << (prefix - 1 - vcn.prefix) < u64::from(count));
            }
        }
    }

    #[test]
    fn test_ipv6_block() {
        let block = Cidr::new("fd00:1234::/48").unwrap();
        let subnets = calculate_subnets(block, 6).unwrap();
        assert_eq!(subnets.len(), 6);
        assert_eq!(subnets[0].to_string(), "fd00:1234::/51");
        assert_eq!(subnets[1].to_string(), "fd00:1234:0:2000::/51");
        for s in &subnets {
            assert!(block.contains(s));
        }
    }

    #[test]
    fn test_ipv6_exhaustion() {
        let block = Cidr::new("fd00::/126").unwrap();
        assert!(calculate_subnets(block, 8).is_err());
        assert_eq!(calculate_subnets(block, 4).unwrap().len(), 4);
    }
}
