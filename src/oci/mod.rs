//! OCI CLI interaction.
//!
//! This module handles all provider queries:
//! - [`cli`] - subprocess execution of `oci` CLI commands
//! - [`query`] - node-pool options and availability-domain listings
//! - [`cache`] - dated JSON caching of query results

pub mod cache;
pub mod cli;
pub mod query;

pub use cache::{read_availability_domains, read_node_pool_options};
