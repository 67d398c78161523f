//! JSON plan document output.

use crate::resources::StackPlan;
use std::error::Error;

/// Render the plan as a pretty JSON document keyed by resource name.
pub fn plan_json(plan: &StackPlan) -> Result<String, Box<dyn Error>> {
    let decls = plan.declarations()?;
    let json = serde_json::to_string_pretty(&decls)
        .map_err(|e| format!("Error serializing plan: {e}"))?;
    Ok(json)
}

/// Write the plan document to a file.
pub fn write_plan_file(plan: &StackPlan, path: &str) -> Result<(), Box<dyn Error>> {
    let json = plan_json(plan)?;
    std::fs::write(path, json).map_err(|e| format!("Error writing plan file {path}: {e}"))?;
    log::info!("Plan written to {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StackConfig;
    use crate::models::Cidr;
    use crate::processing::NetworkTopology;
    use crate::resources::{build_cluster, build_network, build_node_pool};

    #[test]
    fn test_plan_json_is_name_keyed() {
        let config = StackConfig {
            stack_name: "dev".to_string(),
            component_name: "main".to_string(),
            compartment_id: "ocid1.compartment.oc1..test".to_string(),
            vcn_cidr: Cidr::new("10.0.0.0/16").unwrap(),
            node_shape: "VM.Standard.A1.Flex".to_string(),
            kubernetes_version: "v1.30.1".to_string(),
            min_nodes: 3,
            ocpus: 1.0,
            memory_in_gbs: 16.0,
            ssh_public_key: None,
            service_cidr: "all-services-in-oracle-services-network".to_string(),
        };
        let topology = NetworkTopology::derive(config.vcn_cidr).unwrap();
        let network = build_network(&config, &topology);
        let cluster = build_cluster(&config, &topology, &network);
        let node_pool = build_node_pool(&config, &network, &cluster, "ocid1.image.oc1..img", vec![]);
        let plan = StackPlan {
            network,
            cluster,
            node_pool,
        };

        let json = plan_json(&plan).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("dev-main-vcn").is_some());
        assert_eq!(value["dev-main-sn-pub-a"]["kind"], "subnet");
        assert_eq!(
            value["dev-main-sn-pub-a"]["properties"]["cidr_block"],
            "10.0.0.0/19"
        );
    }
}
