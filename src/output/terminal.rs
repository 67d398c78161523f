//! Terminal plan summary.

use crate::models::SubnetRole;
use crate::resources::StackPlan;
use colored::Colorize;
use itertools::Itertools;
use std::error::Error;

/// Format a value as a quoted, right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Print a human-readable summary of the plan to stdout.
pub async fn print_plan(plan: &StackPlan) -> Result<(), Box<dyn Error>> {
    log::info!("#Start print_plan() with {} resources", plan.resource_count());

    println!(
        "{} {} ({})",
        "VCN".bold(),
        plan.network.vcn.name,
        plan.network
            .vcn
            .cidr_blocks
            .iter()
            .map(|c| c.to_string())
            .join(", ")
    );

    for (role, subnet) in &plan.network.subnets {
        let tier = if role.is_public() {
            "public".green()
        } else {
            "private".yellow()
        };
        println!(
            "  {} {} {} {}",
            format_field(role.group(), 12),
            format_field(&subnet.cidr_block, 16),
            tier,
            subnet.name
        );
    }

    let k8s = &plan.cluster.options.kubernetes_network_config;
    println!(
        "  {} {}",
        format_field(SubnetRole::PodNetwork.group(), 12),
        format_field(&k8s.pods_cidr, 16)
    );
    println!(
        "  {} {}",
        format_field(SubnetRole::ServiceNetwork.group(), 12),
        format_field(&k8s.services_cidr, 16)
    );

    println!(
        "{} {} ({}, {} nodes on {})",
        "Cluster".bold(),
        plan.cluster.name,
        plan.cluster.kubernetes_version,
        plan.node_pool.size,
        plan.node_pool.node_shape
    );
    println!(
        "  image {}",
        plan.node_pool.node_source_details.image_id
    );

    Ok(())
}
