//! Derivation logic for the stack plan.
//!
//! This module contains the pure computations the resource declarations are
//! built from:
//! - [`subnets`] - uniform subnet calculation from a parent block
//! - [`topology`] - role -> CIDR mapping for the cluster network
//! - [`images`] - node image selection by shape naming convention
//! - [`placement`] - availability-domain placement configs

mod images;
mod placement;
mod subnets;
mod topology;

// Re-export public functions
pub use images::{format_version, select_node_image, ImageError};
pub use placement::{placement_configs, PlacementConfig};
pub use subnets::calculate_subnets;
pub use topology::NetworkTopology;
