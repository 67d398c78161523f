//! Domain models for the OKE stack builder.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Cidr`] - IPv4/IPv6 address blocks in CIDR notation
//! - [`SubnetRole`] - fixed roles for the subnets carved from the VCN block
//! - [`ImageSource`], [`NodePoolOptions`], [`AvailabilityDomain`] - provider
//!   query results

mod cidr;
mod image;
mod role;

// Re-export public types
pub use cidr::{addr_bits, bits_to_addr, Cidr, CidrError, MAX_LENGTH_V4, MAX_LENGTH_V6};
pub use image::{AvailabilityDomain, ImageSource, NodePoolOptions};
pub use role::SubnetRole;
