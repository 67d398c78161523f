//! Node placement across availability domains.

use crate::models::AvailabilityDomain;
use serde::{Deserialize, Serialize};

/// Placement of node-pool nodes in one availability domain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Availability domain name.
    pub availability_domain: String,
    /// Reference to the subnet the nodes attach to.
    pub subnet: String,
}

/// Build one placement config per availability domain, all on the same
/// worker subnet.
pub fn placement_configs(ads: &[AvailabilityDomain], subnet: &str) -> Vec<PlacementConfig> {
    ads.iter()
        .map(|ad| PlacementConfig {
            availability_domain: ad.name.clone(),
            subnet: subnet.to_string(),
        })
        .collect()
}
