//! Derives a declarative resource plan for an OKE cluster and its VCN.

pub mod config;
pub mod models;
pub mod oci;
pub mod output;
pub mod processing;
pub mod resources;

use config::StackConfig;
use models::{AvailabilityDomain, NodePoolOptions, SubnetRole};
use processing::{placement_configs, select_node_image, NetworkTopology};
use resources::{build_cluster, build_network, build_node_pool, StackPlan};
use std::error::Error;

/// Derive the network topology for a stack.
pub fn derive_topology(config: &StackConfig) -> Result<NetworkTopology, Box<dyn Error>> {
    let topology = NetworkTopology::derive(config.vcn_cidr)?;
    log::info!("derived topology:\n{topology}");
    Ok(topology)
}

/// Build the complete stack plan from configuration and provider query
/// results.
pub fn build_stack_plan(
    config: &StackConfig,
    options: &NodePoolOptions,
    ads: &[AvailabilityDomain],
) -> Result<StackPlan, Box<dyn Error>> {
    let topology = derive_topology(config)?;
    let network = build_network(config, &topology);

    let image_id = select_node_image(
        &options.sources,
        &config.node_shape,
        &config.kubernetes_version,
    )?;

    let cluster = build_cluster(config, &topology, &network);
    let placements = placement_configs(ads, &network.subnet(SubnetRole::PrivateA).name);
    let node_pool = build_node_pool(config, &network, &cluster, &image_id, placements);

    Ok(StackPlan {
        network,
        cluster,
        node_pool,
    })
}
