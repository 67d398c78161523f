//! Freeform tag conventions.
//!
//! Every declared resource carries the same base tag set; network resources
//! and gateways add their own keys on top.

use std::collections::BTreeMap;

/// Tag map with deterministic key order.
pub type Tags = BTreeMap<String, String>;

/// Builds standardized freeform tags for one stack.
#[derive(Debug, Clone)]
pub struct ResourceTagger {
    stack_name: String,
    resource_name: String,
}

impl ResourceTagger {
    pub fn new(stack_name: &str, resource_name: &str) -> ResourceTagger {
        ResourceTagger {
            stack_name: stack_name.to_string(),
            resource_name: resource_name.to_string(),
        }
    }

    /// Base tags shared by every resource, with optional extras merged in.
    pub fn freeform_tags(
        &self,
        resource_name: &str,
        resource_type: &str,
        additional_tags: Option<Tags>,
    ) -> Tags {
        let mut tags = Tags::new();
        tags.insert("Name".to_string(), resource_name.to_string());
        tags.insert("ResourceType".to_string(), resource_type.to_string());
        tags.insert("Environment".to_string(), self.stack_name.clone());
        tags.insert(
            "CreatedBy".to_string(),
            format!("{}-{}", self.stack_name, self.resource_name),
        );
        if let Some(extra) = additional_tags {
            tags.extend(extra);
        }
        tags
    }

    /// Tags for subnets, security lists and route tables.
    pub fn network_resource_tags(
        &self,
        resource_name: &str,
        resource_type: &str,
        network_type: &str,
        subnet_group: Option<&str>,
        additional_tags: Option<Tags>,
    ) -> Tags {
        let mut extra = Tags::new();
        extra.insert("NetworkType".to_string(), network_type.to_string());
        if let Some(group) = subnet_group {
            extra.insert("SubnetGroup".to_string(), group.to_string());
        }
        if let Some(more) = additional_tags {
            extra.extend(more);
        }
        self.freeform_tags(resource_name, resource_type, Some(extra))
    }

    /// Tags for gateways.
    pub fn gateway_tags(
        &self,
        resource_name: &str,
        gateway_type: &str,
        additional_tags: Option<Tags>,
    ) -> Tags {
        let mut extra = Tags::new();
        extra.insert("GatewayType".to_string(), gateway_type.to_string());
        if let Some(more) = additional_tags {
            extra.extend(more);
        }
        self.freeform_tags(resource_name, "gateway", Some(extra))
    }
}
