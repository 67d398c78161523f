//! Route table declarations.

use crate::resources::security::AddressType;
use serde::{Deserialize, Serialize};

/// A single route rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_type: Option<AddressType>,
    /// Reference to the gateway the traffic is routed through.
    pub network_entity: String,
}

impl RouteRule {
    /// Default route through a gateway.
    pub fn default_route(gateway: &str) -> RouteRule {
        RouteRule {
            destination: "0.0.0.0/0".to_string(),
            destination_type: None,
            network_entity: gateway.to_string(),
        }
    }

    /// Service-network route through the service gateway.
    pub fn service_route(service_cidr: &str, gateway: &str) -> RouteRule {
        RouteRule {
            destination: service_cidr.to_string(),
            destination_type: Some(AddressType::ServiceCidrBlock),
            network_entity: gateway.to_string(),
        }
    }
}

/// Route rules for public subnets: everything through the internet gateway.
pub fn public_route_rules(internet_gateway: &str) -> Vec<RouteRule> {
    vec![RouteRule::default_route(internet_gateway)]
}

/// Route rules for private subnets: default through the NAT gateway,
/// provider services through the service gateway.
pub fn private_route_rules(
    nat_gateway: &str,
    service_gateway: &str,
    service_cidr: &str,
) -> Vec<RouteRule> {
    vec![
        RouteRule::default_route(nat_gateway),
        RouteRule::service_route(service_cidr, service_gateway),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_rules() {
        let rules = public_route_rules("dev-main-igw");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].destination, "0.0.0.0/0");
        assert_eq!(rules[0].network_entity, "dev-main-igw");
        assert!(rules[0].destination_type.is_none());
    }

    #[test]
    fn test_private_rules() {
        let rules = private_route_rules(
            "dev-main-natgw",
            "dev-main-svcgw",
            "all-services-in-oracle-services-network",
        );
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].network_entity, "dev-main-natgw");
        assert_eq!(rules[1].network_entity, "dev-main-svcgw");
        assert_eq!(rules[1].destination_type, Some(AddressType::ServiceCidrBlock));
    }
}
