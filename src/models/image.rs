//! Provider query result models.
//!
//! These mirror the JSON shapes returned by the `oci` CLI for node-pool
//! image options and availability domains.

use serde::{Deserialize, Serialize};

/// A candidate node image from the node-pool options listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ImageSource {
    /// Display name of the image (e.g. "Oracle-Linux-8.9-aarch64-2024.01.26-0-OKE-1.30.1").
    pub source_name: String,
    /// OCID of the image.
    pub image_id: String,
    /// Source type, always "IMAGE" in practice.
    #[serde(default)]
    pub source_type: Option<String>,
}

/// Node-pool options as returned by the container-engine service.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NodePoolOptions {
    /// Available node images.
    pub sources: Vec<ImageSource>,
}

/// An availability domain within a region.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityDomain {
    /// Availability domain name (e.g. "Uocm:PHX-AD-1").
    pub name: String,
}
