//! Security list rule sets for the cluster network.
//!
//! One rule matrix per subnet role, following the OKE networking guide:
//! API endpoint traffic on 6443/12250, kubelet on 10250, node ports
//! 30000-32767, kube-proxy health on 10256, ICMP path discovery throughout.

use crate::models::SubnetRole;
use crate::processing::NetworkTopology;
use serde::{Deserialize, Serialize};

/// TCP protocol number.
pub const PROTO_TCP: &str = "6";
/// ICMP protocol number.
pub const PROTO_ICMP: &str = "1";
/// All protocols.
pub const PROTO_ALL: &str = "all";

const ANYWHERE: &str = "0.0.0.0/0";

/// A destination or source port range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub min: u16,
    pub max: u16,
}

impl PortRange {
    pub fn single(port: u16) -> PortRange {
        PortRange { min: port, max: port }
    }

    pub fn new(min: u16, max: u16) -> PortRange {
        PortRange { min, max }
    }
}

/// ICMP type/code selector.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmpOptions {
    #[serde(rename = "type")]
    pub icmp_type: u8,
    pub code: u8,
}

impl IcmpOptions {
    /// Destination unreachable, fragmentation needed (path MTU discovery).
    pub fn path_discovery() -> IcmpOptions {
        IcmpOptions { icmp_type: 3, code: 4 }
    }
}

/// Address kind a rule points at.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    CidrBlock,
    ServiceCidrBlock,
}

/// An ingress security rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IngressRule {
    pub description: String,
    pub protocol: String,
    pub source: String,
    pub source_type: AddressType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_options: Option<PortRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icmp_options: Option<IcmpOptions>,
}

impl IngressRule {
    fn tcp(description: &str, source: impl Into<String>, ports: PortRange) -> IngressRule {
        IngressRule {
            description: description.to_string(),
            protocol: PROTO_TCP.to_string(),
            source: source.into(),
            source_type: AddressType::CidrBlock,
            tcp_options: Some(ports),
            icmp_options: None,
        }
    }

    fn all(description: &str, source: impl Into<String>) -> IngressRule {
        IngressRule {
            description: description.to_string(),
            protocol: PROTO_ALL.to_string(),
            source: source.into(),
            source_type: AddressType::CidrBlock,
            tcp_options: None,
            icmp_options: None,
        }
    }

    fn path_discovery(source: impl Into<String>) -> IngressRule {
        IngressRule {
            description: "Path discovery".to_string(),
            protocol: PROTO_ICMP.to_string(),
            source: source.into(),
            source_type: AddressType::CidrBlock,
            tcp_options: None,
            icmp_options: Some(IcmpOptions::path_discovery()),
        }
    }
}

/// An egress security rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EgressRule {
    pub description: String,
    pub protocol: String,
    pub destination: String,
    pub destination_type: AddressType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_options: Option<PortRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icmp_options: Option<IcmpOptions>,
}

impl EgressRule {
    fn tcp(description: &str, destination: impl Into<String>, ports: Option<PortRange>) -> EgressRule {
        EgressRule {
            description: description.to_string(),
            protocol: PROTO_TCP.to_string(),
            destination: destination.into(),
            destination_type: AddressType::CidrBlock,
            tcp_options: ports,
            icmp_options: None,
        }
    }

    fn tcp_service(description: &str, service_cidr: &str) -> EgressRule {
        EgressRule {
            description: description.to_string(),
            protocol: PROTO_TCP.to_string(),
            destination: service_cidr.to_string(),
            destination_type: AddressType::ServiceCidrBlock,
            tcp_options: None,
            icmp_options: None,
        }
    }

    fn all(description: &str, destination: impl Into<String>) -> EgressRule {
        EgressRule {
            description: description.to_string(),
            protocol: PROTO_ALL.to_string(),
            destination: destination.into(),
            destination_type: AddressType::CidrBlock,
            tcp_options: None,
            icmp_options: None,
        }
    }

    fn path_discovery(destination: impl Into<String>) -> EgressRule {
        EgressRule {
            description: "Path discovery".to_string(),
            protocol: PROTO_ICMP.to_string(),
            destination: destination.into(),
            destination_type: AddressType::CidrBlock,
            tcp_options: None,
            icmp_options: Some(IcmpOptions::path_discovery()),
        }
    }

    fn path_discovery_service(service_cidr: &str) -> EgressRule {
        EgressRule {
            description: "Path discovery".to_string(),
            protocol: PROTO_ICMP.to_string(),
            destination: service_cidr.to_string(),
            destination_type: AddressType::ServiceCidrBlock,
            tcp_options: None,
            icmp_options: Some(IcmpOptions::path_discovery()),
        }
    }
}

/// Ingress and egress rules for one security list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    pub ingress: Vec<IngressRule>,
    pub egress: Vec<EgressRule>,
}

/// Build the rule set for a subnet role.
///
/// `service_cidr` is the provider's service network label used for service
/// gateway routes and rules.
pub fn rules_for_role(role: SubnetRole, topology: &NetworkTopology, service_cidr: &str) -> RuleSet {
    let endpoint = topology.cidr(SubnetRole::PublicA).to_string();
    let lb = topology.cidr(SubnetRole::PublicB).to_string();
    let workers = topology.cidr(SubnetRole::PrivateA).to_string();
    let pods = topology.cidr(SubnetRole::PrivateB).to_string();

    match role {
        SubnetRole::PublicA => RuleSet {
            ingress: vec![
                IngressRule::tcp(
                    "Kubernetes worker to Kubernetes API endpoint communication.",
                    &workers,
                    PortRange::single(6443),
                ),
                IngressRule::tcp(
                    "Kubernetes worker to Kubernetes API endpoint communication.",
                    &workers,
                    PortRange::single(12250),
                ),
                IngressRule::path_discovery(&workers),
                IngressRule::tcp(
                    "Pod to Kubernetes API endpoint communication (when using VCN-native pod networking).",
                    &pods,
                    PortRange::single(6443),
                ),
                IngressRule::tcp(
                    "Pod to Kubernetes API endpoint communication (when using VCN-native pod networking).",
                    &pods,
                    PortRange::single(12250),
                ),
                IngressRule::tcp(
                    "External access to Kubernetes API endpoint.",
                    ANYWHERE,
                    PortRange::single(6443),
                ),
            ],
            egress: vec![
                EgressRule::tcp_service(
                    "Allow Kubernetes API endpoint to communicate with OKE.",
                    service_cidr,
                ),
                EgressRule::path_discovery_service(service_cidr),
                EgressRule::tcp(
                    "Allow Kubernetes API endpoint to communicate with worker nodes.",
                    &workers,
                    Some(PortRange::single(10250)),
                ),
                EgressRule::path_discovery(&workers),
                EgressRule::all(
                    "Allow Kubernetes API endpoint to communicate with pods (when using VCN-native pod networking).",
                    &pods,
                ),
            ],
        },
        SubnetRole::PrivateA => RuleSet {
            ingress: vec![
                IngressRule::tcp(
                    "Allow Kubernetes API endpoint to communicate with worker nodes.",
                    &endpoint,
                    PortRange::single(10250),
                ),
                IngressRule::path_discovery(ANYWHERE),
                IngressRule::tcp(
                    "Load balancer to worker nodes node ports.",
                    &lb,
                    PortRange::new(30000, 32767),
                ),
                IngressRule::tcp(
                    "Allow load balancer to communicate with kube-proxy on worker nodes.",
                    &lb,
                    PortRange::new(10256, 12250),
                ),
            ],
            egress: vec![
                EgressRule::tcp("Allow worker nodes to access pods.", &pods, None),
                EgressRule::path_discovery(ANYWHERE),
                EgressRule::tcp_service("Allow worker nodes to communicate with OKE.", service_cidr),
                EgressRule::tcp(
                    "Kubernetes worker to Kubernetes API endpoint communication.",
                    &endpoint,
                    Some(PortRange::single(6443)),
                ),
                EgressRule::tcp(
                    "Kubernetes worker to Kubernetes API endpoint communication.",
                    &endpoint,
                    Some(PortRange::single(12250)),
                ),
                EgressRule::tcp(
                    "Access to external container registry.",
                    ANYWHERE,
                    Some(PortRange::single(443)),
                ),
            ],
        },
        SubnetRole::PrivateB => RuleSet {
            ingress: vec![
                IngressRule::all("Allow worker nodes to access pods.", &workers),
                IngressRule::all(
                    "Allow Kubernetes API endpoint to communicate with pods.",
                    &endpoint,
                ),
                IngressRule::all("Allow pods to communicate with other pods.", &pods),
            ],
            egress: vec![
                EgressRule::all("Allow pods to communicate with other pods.", &pods),
                EgressRule::path_discovery_service(service_cidr),
                EgressRule::tcp_service("Allow pods to communicate with OCI services.", service_cidr),
                EgressRule::tcp(
                    "(optional) Allow pods to communicate with internet.",
                    ANYWHERE,
                    Some(PortRange::single(443)),
                ),
                EgressRule::tcp(
                    "Pod to Kubernetes API endpoint communication (when using VCN-native pod networking).",
                    &endpoint,
                    Some(PortRange::single(6443)),
                ),
                EgressRule::tcp(
                    "Pod to Kubernetes API endpoint communication (when using VCN-native pod networking).",
                    &endpoint,
                    Some(PortRange::single(12250)),
                ),
            ],
        },
        SubnetRole::PublicB => RuleSet {
            ingress: vec![
                IngressRule::tcp(
                    "Load balancer listener protocol and port. Customize as required.",
                    &pods,
                    PortRange::single(443),
                ),
                IngressRule::tcp(
                    "Load balancer listener protocol and port. Customize as required.",
                    &pods,
                    PortRange::single(80),
                ),
                IngressRule::tcp(
                    "Load balancer listener protocol and port. Customize as required.",
                    ANYWHERE,
                    PortRange::single(443),
                ),
                IngressRule::tcp(
                    "Load balancer listener protocol and port. Customize as required.",
                    ANYWHERE,
                    PortRange::single(80),
                ),
            ],
            egress: vec![
                EgressRule::tcp(
                    "Load balancer to worker nodes node ports.",
                    &workers,
                    Some(PortRange::new(30000, 32767)),
                ),
                EgressRule::tcp(
                    "Allow load balancer to communicate with kube-proxy on worker nodes.",
                    &workers,
                    Some(PortRange::single(10256)),
                ),
            ],
        },
        // Pod/service network CIDRs get no VCN security list.
        SubnetRole::PodNetwork | SubnetRole::ServiceNetwork => RuleSet::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cidr;

    fn topology() -> NetworkTopology {
        NetworkTopology::derive(Cidr::new("10.0.0.0/16").unwrap()).unwrap()
    }

    const SERVICES: &str = "all-services-in-oracle-services-network";

    #[test]
    fn test_endpoint_rule_counts() {
        let rules = rules_for_role(SubnetRole::PublicA, &topology(), SERVICES);
        assert_eq!(rules.ingress.len(), 6);
        assert_eq!(rules.egress.len(), 5);
    }

    #[test]
    fn test_endpoint_api_port_open_to_world() {
        let rules = rules_for_role(SubnetRole::PublicA, &topology(), SERVICES);
        let external = rules
            .ingress
            .iter()
            .find(|r| r.source == "0.0.0.0/0")
            .unwrap();
        assert_eq!(external.tcp_options, Some(PortRange::single(6443)));
        assert_eq!(external.protocol, PROTO_TCP);
    }

    #[test]
    fn test_worker_rules_reference_topology_cidrs() {
        let topo = topology();
        let rules = rules_for_role(SubnetRole::PrivateA, &topo, SERVICES);
        // Node ports from the load balancer subnet.
        let node_ports = rules
            .ingress
            .iter()
            .find(|r| r.tcp_options == Some(PortRange::new(30000, 32767)))
            .unwrap();
        assert_eq!(node_ports.source, topo.cidr(SubnetRole::PublicB).to_string());
        // Kubelet from the endpoint subnet.
        let kubelet = rules
            .ingress
            .iter()
            .find(|r| r.tcp_options == Some(PortRange::single(10250)))
            .unwrap();
        assert_eq!(kubelet.source, topo.cidr(SubnetRole::PublicA).to_string());
    }

    #[test]
    fn test_worker_egress_service_cidr() {
        let rules = rules_for_role(SubnetRole::PrivateA, &topology(), SERVICES);
        let svc = rules
            .egress
            .iter()
            .find(|r| r.destination_type == AddressType::ServiceCidrBlock)
            .unwrap();
        assert_eq!(svc.destination, SERVICES);
    }

    #[test]
    fn test_pod_rules_allow_pod_to_pod() {
        let topo = topology();
        let rules = rules_for_role(SubnetRole::PrivateB, &topo, SERVICES);
        let pods_cidr = topo.cidr(SubnetRole::PrivateB).to_string();
        assert!(rules
            .ingress
            .iter()
            .any(|r| r.protocol == PROTO_ALL && r.source == pods_cidr));
        assert!(rules
            .egress
            .iter()
            .any(|r| r.protocol == PROTO_ALL && r.destination == pods_cidr));
    }

    #[test]
    fn test_lb_listeners() {
        let rules = rules_for_role(SubnetRole::PublicB, &topology(), SERVICES);
        assert_eq!(rules.ingress.len(), 4);
        let ports: Vec<u16> = rules
            .ingress
            .iter()
            .filter_map(|r| r.tcp_options.map(|p| p.min))
            .collect();
        assert_eq!(ports, vec![443, 80, 443, 80]);
    }

    #[test]
    fn test_cluster_network_roles_have_no_rules() {
        let rules = rules_for_role(SubnetRole::PodNetwork, &topology(), SERVICES);
        assert!(rules.ingress.is_empty() && rules.egress.is_empty());
    }

    #[test]
    fn test_path_discovery_icmp_options() {
        let rules = rules_for_role(SubnetRole::PrivateA, &topology(), SERVICES);
        let icmp = rules
            .ingress
            .iter()
            .find(|r| r.protocol == PROTO_ICMP)
            .unwrap();
        assert_eq!(icmp.icmp_options, Some(IcmpOptions::path_discovery()));
        let json = serde_json::to_value(icmp).unwrap();
        assert_eq!(json["icmp_options"]["type"], 3);
        assert_eq!(json["icmp_options"]["code"], 4);
        assert_eq!(json["source_type"], "CIDR_BLOCK");
    }
}
