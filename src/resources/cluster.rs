//! Cluster and node pool declarations.

use crate::config::StackConfig;
use crate::models::{Cidr, SubnetRole};
use crate::processing::{NetworkTopology, PlacementConfig};
use crate::resources::naming::ResourceNamer;
use crate::resources::network::NetworkDecls;
use crate::resources::tagging::{ResourceTagger, Tags};
use serde::{Deserialize, Serialize};

/// VCN-native pod networking.
pub const CNI_TYPE: &str = "OCI_VCN_IP_NATIVE";
/// Cluster tier.
pub const CLUSTER_TYPE: &str = "BASIC_CLUSTER";

/// Pod and service network CIDRs for the cluster.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KubernetesNetworkConfig {
    pub pods_cidr: Cidr,
    pub services_cidr: Cidr,
}

/// Cluster-level options.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClusterOptions {
    /// References to the service load balancer subnets.
    pub service_lb_subnets: Vec<String>,
    pub kubernetes_network_config: KubernetesNetworkConfig,
}

/// API endpoint placement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Reference to the endpoint subnet.
    pub subnet: String,
    pub is_public_ip_enabled: bool,
}

/// OKE cluster declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClusterDecl {
    pub name: String,
    pub compartment_id: String,
    pub display_name: String,
    /// Reference to the VCN.
    pub vcn: String,
    pub kubernetes_version: String,
    pub cluster_type: String,
    pub cni_type: String,
    pub options: ClusterOptions,
    pub endpoint_config: EndpointConfig,
    pub freeform_tags: Tags,
}

/// Node shape sizing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeShapeConfig {
    pub ocpus: f64,
    pub memory_in_gbs: f64,
}

/// Node image source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeSourceDetails {
    pub image_id: String,
    pub source_type: String,
}

/// Node pool declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodePoolDecl {
    pub name: String,
    pub compartment_id: String,
    /// Reference to the cluster.
    pub cluster: String,
    pub kubernetes_version: String,
    pub node_shape: String,
    pub node_shape_config: NodeShapeConfig,
    pub node_source_details: NodeSourceDetails,
    pub placement_configs: Vec<PlacementConfig>,
    /// Node count.
    pub size: u32,
    /// References to the pod subnets for VCN-native networking.
    pub pod_subnets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
    pub freeform_tags: Tags,
}

/// Build the cluster declaration on top of the network graph.
pub fn build_cluster(
    config: &StackConfig,
    topology: &NetworkTopology,
    network: &NetworkDecls,
) -> ClusterDecl {
    let namer = ResourceNamer::new(&config.stack_name, &config.component_name);
    let tagger = ResourceTagger::new(&config.stack_name, &config.component_name);
    let name = namer.resource_name("cluster");

    ClusterDecl {
        name: name.clone(),
        compartment_id: config.compartment_id.clone(),
        display_name: name.clone(),
        vcn: network.vcn.name.clone(),
        kubernetes_version: config.kubernetes_version.clone(),
        cluster_type: CLUSTER_TYPE.to_string(),
        cni_type: CNI_TYPE.to_string(),
        options: ClusterOptions {
            service_lb_subnets: vec![network.subnet(SubnetRole::PublicB).name.clone()],
            kubernetes_network_config: KubernetesNetworkConfig {
                pods_cidr: topology.cidr(SubnetRole::PodNetwork),
                services_cidr: topology.cidr(SubnetRole::ServiceNetwork),
            },
        },
        endpoint_config: EndpointConfig {
            subnet: network.subnet(SubnetRole::PublicA).name.clone(),
            is_public_ip_enabled: true,
        },
        freeform_tags: tagger.freeform_tags(&name, "cluster", None),
    }
}

/// Build the node pool declaration for a cluster.
pub fn build_node_pool(
    config: &StackConfig,
    network: &NetworkDecls,
    cluster: &ClusterDecl,
    image_id: &str,
    placement_configs: Vec<PlacementConfig>,
) -> NodePoolDecl {
    let namer = ResourceNamer::new(&config.stack_name, &config.component_name);
    let tagger = ResourceTagger::new(&config.stack_name, &config.component_name);
    let name = namer.resource_name("nodepool");

    NodePoolDecl {
        name: name.clone(),
        compartment_id: config.compartment_id.clone(),
        cluster: cluster.name.clone(),
        kubernetes_version: config.kubernetes_version.clone(),
        node_shape: config.node_shape.clone(),
        node_shape_config: NodeShapeConfig {
            ocpus: config.ocpus,
            memory_in_gbs: config.memory_in_gbs,
        },
        node_source_details: NodeSourceDetails {
            image_id: image_id.to_string(),
            source_type: "IMAGE".to_string(),
        },
        placement_configs,
        size: config.min_nodes,
        pod_subnets: vec![network.subnet(SubnetRole::PrivateB).name.clone()],
        ssh_public_key: config.ssh_public_key.clone(),
        freeform_tags: tagger.freeform_tags(&name, "node-pool", None),
    }
}
