//! The assembled stack plan.
//!
//! A [`StackPlan`] holds every declaration for one stack and can flatten
//! itself into the name-keyed document the provisioning engine consumes.

use crate::resources::cluster::{ClusterDecl, NodePoolDecl};
use crate::resources::network::NetworkDecls;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;

/// All declarations for one OKE stack.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StackPlan {
    pub network: NetworkDecls,
    pub cluster: ClusterDecl,
    pub node_pool: NodePoolDecl,
}

/// A declaration entry in the flattened plan document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Resource kind (e.g. "subnet", "route-table").
    pub kind: String,
    /// The declaration body.
    pub properties: Value,
}

impl StackPlan {
    /// Flatten the plan into declarations keyed by resource name.
    pub fn declarations(&self) -> Result<BTreeMap<String, Declaration>, Box<dyn Error>> {
        let mut decls = BTreeMap::new();

        let mut insert = |name: &str, kind: &str, value: Value| {
            decls.insert(
                name.to_string(),
                Declaration {
                    kind: kind.to_string(),
                    properties: value,
                },
            );
        };

        insert(
            &self.network.vcn.name,
            "vcn",
            serde_json::to_value(&self.network.vcn)?,
        );
        for gateway in [
            &self.network.internet_gateway,
            &self.network.nat_gateway,
            &self.network.service_gateway,
        ] {
            insert(&gateway.name, "gateway", serde_json::to_value(gateway)?);
        }
        for sl in self.network.security_lists.values() {
            insert(&sl.name, "security-list", serde_json::to_value(sl)?);
        }
        for rt in self.network.route_tables.values() {
            insert(&rt.name, "route-table", serde_json::to_value(rt)?);
        }
        for sn in self.network.subnets.values() {
            insert(&sn.name, "subnet", serde_json::to_value(sn)?);
        }
        insert(
            &self.cluster.name,
            "cluster",
            serde_json::to_value(&self.cluster)?,
        );
        insert(
            &self.node_pool.name,
            "node-pool",
            serde_json::to_value(&self.node_pool)?,
        );

        Ok(decls)
    }

    /// Total number of declared resources.
    pub fn resource_count(&self) -> usize {
        // vcn + 3 gateways + per-role lists/tables/subnets + cluster + pool
        1 + 3
            + self.network.security_lists.len()
            + self.network.route_tables.len()
            + self.network.subnets.len()
            + 2
    }
}
