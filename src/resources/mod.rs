//! Resource declarations for the provisioning engine.
//!
//! - [`naming`] / [`tagging`] - stack-wide name and tag conventions
//! - [`security`] / [`routing`] - security list and route table rule sets
//! - [`network`] - the VCN resource graph
//! - [`cluster`] - the cluster and node pool
//! - [`plan`] - the assembled, name-keyed plan document

pub mod cluster;
pub mod naming;
pub mod network;
pub mod plan;
pub mod routing;
pub mod security;
pub mod tagging;

pub use cluster::{build_cluster, build_node_pool, ClusterDecl, NodePoolDecl};
pub use naming::ResourceNamer;
pub use network::{build_network, NetworkDecls};
pub use plan::{Declaration, StackPlan};
pub use tagging::{ResourceTagger, Tags};
