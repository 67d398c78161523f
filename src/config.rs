//! Stack configuration from the environment.
//!
//! All knobs come from environment variables (loaded via dotenv in `main`).
//! Only the compartment OCID is required; everything else has the defaults
//! the stack was designed around.

use crate::models::Cidr;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;

/// Configuration for one OKE stack.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StackConfig {
    /// Stack name, used as the environment tag and name prefix.
    pub stack_name: String,
    /// Component name within the stack (second name segment).
    pub component_name: String,
    /// Compartment OCID all resources are created in.
    pub compartment_id: String,
    /// VCN address block.
    pub vcn_cidr: Cidr,
    /// Node shape for the node pool.
    pub node_shape: String,
    /// Kubernetes version, "v"-prefixed.
    pub kubernetes_version: String,
    /// Minimum node count for the node pool.
    pub min_nodes: u32,
    /// OCPUs per node.
    pub ocpus: f64,
    /// Memory per node in GBs.
    pub memory_in_gbs: f64,
    /// Optional SSH public key installed on nodes.
    pub ssh_public_key: Option<String>,
    /// Service network label used for service gateway routes and rules.
    pub service_cidr: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl StackConfig {
    /// Read the configuration from environment variables.
    ///
    /// `OKE_COMPARTMENT_OCID` is required; the rest fall back to defaults.
    pub fn from_env() -> Result<StackConfig, Box<dyn Error>> {
        let compartment_id = env::var("OKE_COMPARTMENT_OCID")
            .map_err(|_| "OKE_COMPARTMENT_OCID is not set")?;

        let vcn_cidr = Cidr::new(&var_or("OKE_VCN_CIDR", "10.0.0.0/16"))?;
        let min_nodes: u32 = var_or("OKE_MIN_NODES", "3")
            .parse()
            .map_err(|e| format!("bad OKE_MIN_NODES: {e}"))?;
        let ocpus: f64 = var_or("OKE_OCPUS", "1")
            .parse()
            .map_err(|e| format!("bad OKE_OCPUS: {e}"))?;
        let memory_in_gbs: f64 = var_or("OKE_MEMORY_IN_GBS", "16")
            .parse()
            .map_err(|e| format!("bad OKE_MEMORY_IN_GBS: {e}"))?;

        Ok(StackConfig {
            stack_name: var_or("OKE_STACK_NAME", "dev"),
            component_name: var_or("OKE_COMPONENT_NAME", "main"),
            compartment_id,
            vcn_cidr,
            node_shape: var_or("OKE_NODE_SHAPE", "VM.Standard.A1.Flex"),
            kubernetes_version: var_or("OKE_KUBERNETES_VERSION", "v1.30.1"),
            min_nodes,
            ocpus,
            memory_in_gbs,
            ssh_public_key: env::var("OKE_SSH_PUBLIC_KEY").ok(),
            service_cidr: var_or(
                "OKE_SERVICE_CIDR",
                "all-services-in-oracle-services-network",
            ),
        })
    }
}
