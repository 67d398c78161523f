//! Subnet role definitions.
//!
//! Each subnet carved from the VCN block has a fixed role. The role order
//! here is the allocation order: changing it changes which CIDR each role
//! receives, so it is part of the network contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a subnet within the cluster network.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubnetRole {
    /// Kubernetes API endpoint subnet (public).
    PublicA,
    /// Load balancer subnet (public).
    PublicB,
    /// Worker node subnet (private).
    PrivateA,
    /// Pod subnet for VCN-native pod networking (private).
    PrivateB,
    /// Cluster pod network CIDR (no VCN subnet is created for it).
    PodNetwork,
    /// Cluster service network CIDR (no VCN subnet is created for it).
    ServiceNetwork,
}

impl SubnetRole {
    /// All roles in allocation order.
    pub const ALL: [SubnetRole; 6] = [
        SubnetRole::PublicA,
        SubnetRole::PublicB,
        SubnetRole::PrivateA,
        SubnetRole::PrivateB,
        SubnetRole::PodNetwork,
        SubnetRole::ServiceNetwork,
    ];

    /// The four roles that become VCN subnets.
    pub const SUBNETS: [SubnetRole; 4] = [
        SubnetRole::PublicA,
        SubnetRole::PublicB,
        SubnetRole::PrivateA,
        SubnetRole::PrivateB,
    ];

    /// Short name used in resource names (e.g. "pub-a").
    pub fn short(&self) -> &'static str {
        match self {
            SubnetRole::PublicA => "pub-a",
            SubnetRole::PublicB => "pub-b",
            SubnetRole::PrivateA => "prv-a",
            SubnetRole::PrivateB => "prv-b",
            SubnetRole::PodNetwork => "pods",
            SubnetRole::ServiceNetwork => "svcs",
        }
    }

    /// Full name used in tags (e.g. "public-a").
    pub fn group(&self) -> &'static str {
        match self {
            SubnetRole::PublicA => "public-a",
            SubnetRole::PublicB => "public-b",
            SubnetRole::PrivateA => "private-a",
            SubnetRole::PrivateB => "private-b",
            SubnetRole::PodNetwork => "pod-network",
            SubnetRole::ServiceNetwork => "service-network",
        }
    }

    /// DNS label prefix for the subnet, if this role gets one.
    pub fn dns_prefix(&self) -> Option<&'static str> {
        match self {
            SubnetRole::PublicA => Some("puba"),
            SubnetRole::PublicB => Some("pubb"),
            SubnetRole::PrivateA => Some("prva"),
            SubnetRole::PrivateB => Some("prvb"),
            SubnetRole::PodNetwork | SubnetRole::ServiceNetwork => None,
        }
    }

    /// Whether instances in this subnet may get public IPs.
    pub fn is_public(&self) -> bool {
        matches!(self, SubnetRole::PublicA | SubnetRole::PublicB)
    }

    /// Network tier tag value.
    pub fn network_type(&self) -> &'static str {
        match self {
            SubnetRole::PublicA | SubnetRole::PublicB => "public",
            SubnetRole::PrivateA | SubnetRole::PrivateB => "private",
            SubnetRole::PodNetwork | SubnetRole::ServiceNetwork => "cluster",
        }
    }
}

impl fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_order() {
        assert_eq!(SubnetRole::ALL[0], SubnetRole::PublicA);
        assert_eq!(SubnetRole::ALL[1], SubnetRole::PublicB);
        assert_eq!(SubnetRole::ALL[2], SubnetRole::PrivateA);
        assert_eq!(SubnetRole::ALL[3], SubnetRole::PrivateB);
        assert_eq!(SubnetRole::ALL[4], SubnetRole::PodNetwork);
        assert_eq!(SubnetRole::ALL[5], SubnetRole::ServiceNetwork);
    }

    #[test]
    fn test_subnet_roles_are_prefix_of_all() {
        for (i, role) in SubnetRole::SUBNETS.iter().enumerate() {
            assert_eq!(*role, SubnetRole::ALL[i]);
            assert!(role.dns_prefix().is_some());
        }
    }

    #[test]
    fn test_public_private_split() {
        assert!(SubnetRole::PublicA.is_public());
        assert!(SubnetRole::PublicB.is_public());
        assert!(!SubnetRole::PrivateA.is_public());
        assert!(!SubnetRole::PrivateB.is_public());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SubnetRole::PublicA).unwrap();
        assert_eq!(json, "\"public-a\"");
        let json = serde_json::to_string(&SubnetRole::PodNetwork).unwrap();
        assert_eq!(json, "\"pod-network\"");
    }
}
