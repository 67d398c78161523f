//! VCN resource declarations: the network, its gateways, security lists,
//! route tables and subnets.
//!
//! Declarations reference each other by resource name; the provisioning
//! engine resolves names to identifiers when the plan is applied.

use crate::config::StackConfig;
use crate::models::{Cidr, SubnetRole};
use crate::processing::NetworkTopology;
use crate::resources::naming::ResourceNamer;
use crate::resources::routing::{private_route_rules, public_route_rules, RouteRule};
use crate::resources::security::{rules_for_role, EgressRule, IngressRule};
use crate::resources::tagging::{ResourceTagger, Tags};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// VCN declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VcnDecl {
    pub name: String,
    pub compartment_id: String,
    pub cidr_blocks: Vec<Cidr>,
    pub display_name: String,
    pub dns_label: String,
    pub freeform_tags: Tags,
}

/// Gateway flavors attached to the VCN.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    Internet,
    Nat,
    Service,
}

/// Gateway declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GatewayDecl {
    pub name: String,
    pub compartment_id: String,
    /// Reference to the parent VCN.
    pub vcn: String,
    pub kind: GatewayKind,
    pub display_name: String,
    /// Internet gateways are created enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Service gateways list the service networks they expose.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub services: Vec<String>,
    pub freeform_tags: Tags,
}

/// Security list declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SecurityListDecl {
    pub name: String,
    pub compartment_id: String,
    pub vcn: String,
    pub display_name: String,
    pub ingress_security_rules: Vec<IngressRule>,
    pub egress_security_rules: Vec<EgressRule>,
    pub freeform_tags: Tags,
}

/// Route table declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteTableDecl {
    pub name: String,
    pub compartment_id: String,
    pub vcn: String,
    pub display_name: String,
    pub route_rules: Vec<RouteRule>,
    pub freeform_tags: Tags,
}

/// Subnet declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetDecl {
    pub name: String,
    pub compartment_id: String,
    pub vcn: String,
    pub cidr_block: Cidr,
    pub display_name: String,
    pub dns_label: String,
    pub prohibit_public_ip_on_vnic: bool,
    /// Reference to the subnet's security list.
    pub security_list: String,
    /// Reference to the subnet's route table.
    pub route_table: String,
    pub freeform_tags: Tags,
}

/// The complete VCN resource graph, keyed by subnet role where per-role
/// resources are concerned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkDecls {
    pub vcn: VcnDecl,
    pub internet_gateway: GatewayDecl,
    pub nat_gateway: GatewayDecl,
    pub service_gateway: GatewayDecl,
    pub security_lists: BTreeMap<SubnetRole, SecurityListDecl>,
    pub route_tables: BTreeMap<SubnetRole, RouteTableDecl>,
    pub subnets: BTreeMap<SubnetRole, SubnetDecl>,
}

impl NetworkDecls {
    /// Subnet declaration for a role.
    pub fn subnet(&self, role: SubnetRole) -> &SubnetDecl {
        &self.subnets[&role]
    }
}

/// Build the VCN resource graph from the stack configuration and derived
/// topology.
pub fn build_network(config: &StackConfig, topology: &NetworkTopology) -> NetworkDecls {
    let namer = ResourceNamer::new(&config.stack_name, &config.component_name);
    let tagger = ResourceTagger::new(&config.stack_name, &config.component_name);

    let vcn_name = namer.resource_name("vcn");
    let vcn = VcnDecl {
        name: vcn_name.clone(),
        compartment_id: config.compartment_id.clone(),
        cidr_blocks: vec![topology.vcn_cidr],
        display_name: vcn_name.clone(),
        dns_label: namer.dns_label("vcn"),
        freeform_tags: tagger.network_resource_tags(&vcn_name, "vcn", "core", None, None),
    };

    let igw_name = namer.resource_name("igw");
    let internet_gateway = GatewayDecl {
        name: igw_name.clone(),
        compartment_id: config.compartment_id.clone(),
        vcn: vcn_name.clone(),
        kind: GatewayKind::Internet,
        display_name: igw_name.clone(),
        enabled: Some(true),
        services: vec![],
        freeform_tags: tagger.gateway_tags(&igw_name, "internet", None),
    };

    let natgw_name = namer.resource_name("natgw");
    let nat_gateway = GatewayDecl {
        name: natgw_name.clone(),
        compartment_id: config.compartment_id.clone(),
        vcn: vcn_name.clone(),
        kind: GatewayKind::Nat,
        display_name: natgw_name.clone(),
        enabled: None,
        services: vec![],
        freeform_tags: tagger.gateway_tags(&natgw_name, "nat", None),
    };

    let svcgw_name = namer.resource_name("svcgw");
    let service_gateway = GatewayDecl {
        name: svcgw_name.clone(),
        compartment_id: config.compartment_id.clone(),
        vcn: vcn_name.clone(),
        kind: GatewayKind::Service,
        display_name: svcgw_name.clone(),
        enabled: None,
        services: vec![config.service_cidr.clone()],
        freeform_tags: tagger.gateway_tags(&svcgw_name, "service", None),
    };

    let mut security_lists = BTreeMap::new();
    let mut route_tables = BTreeMap::new();
    let mut subnets = BTreeMap::new();

    for (role, cidr) in topology.subnet_roles() {
        let sl_name = namer.resource_name(&format!("sl-{}", role.short()));
        let rules = rules_for_role(role, topology, &config.service_cidr);
        security_lists.insert(
            role,
            SecurityListDecl {
                name: sl_name.clone(),
                compartment_id: config.compartment_id.clone(),
                vcn: vcn_name.clone(),
                display_name: sl_name.clone(),
                ingress_security_rules: rules.ingress,
                egress_security_rules: rules.egress,
                freeform_tags: tagger.network_resource_tags(
                    &sl_name,
                    "security-list",
                    role.network_type(),
                    Some(role.group()),
                    None,
                ),
            },
        );

        let rt_name = namer.resource_name(&format!("rt-{}", role.short()));
        let route_rules = if role.is_public() {
            public_route_rules(&igw_name)
        } else {
            private_route_rules(&natgw_name, &svcgw_name, &config.service_cidr)
        };
        route_tables.insert(
            role,
            RouteTableDecl {
                name: rt_name.clone(),
                compartment_id: config.compartment_id.clone(),
                vcn: vcn_name.clone(),
                display_name: rt_name.clone(),
                route_rules,
                freeform_tags: tagger.network_resource_tags(
                    &rt_name,
                    "route-table",
                    role.network_type(),
                    Some(role.group()),
                    None,
                ),
            },
        );

        let sn_name = namer.resource_name(&format!("sn-{}", role.short()));
        let mut extra = Tags::new();
        extra.insert("CidrRange".to_string(), cidr.to_string());
        // SUBNETS roles always carry a dns prefix.
        let dns_prefix = role.dns_prefix().unwrap_or_default();
        subnets.insert(
            role,
            SubnetDecl {
                name: sn_name.clone(),
                compartment_id: config.compartment_id.clone(),
                vcn: vcn_name.clone(),
                cidr_block: cidr,
                display_name: sn_name.clone(),
                dns_label: namer.dns_label(dns_prefix),
                prohibit_public_ip_on_vnic: !role.is_public(),
                security_list: sl_name,
                route_table: rt_name,
                freeform_tags: tagger.network_resource_tags(
                    &sn_name,
                    "subnet",
                    role.network_type(),
                    Some(role.group()),
                    Some(extra),
                ),
            },
        );
    }

    NetworkDecls {
        vcn,
        internet_gateway,
        nat_gateway,
        service_gateway,
        security_lists,
        route_tables,
        subnets,
    }
}
