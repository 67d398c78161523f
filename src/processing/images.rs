//! Node image selection.
//!
//! Picks a node image OCID from the container-engine image listing based on
//! the node shape's naming convention and the Kubernetes version.

use crate::models::ImageSource;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors produced by image selection.
#[derive(Debug, Error)]
pub enum ImageError {
    /// No image display name matched the shape/version pattern.
    #[error("no image matches shape `{shape}` at Kubernetes version `{version}`")]
    NoMatchingImage { shape: String, version: String },

    /// The derived name pattern failed to compile.
    #[error("bad image name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

static ARM_SHAPE_REGEX: OnceLock<Regex> = OnceLock::new();
static GPU_SHAPE_REGEX: OnceLock<Regex> = OnceLock::new();

fn arm_shape_regex() -> &'static Regex {
    ARM_SHAPE_REGEX
        .get_or_init(|| Regex::new(r"^VM\.Standard\.A\d+\.Flex").expect("Invalid Regex"))
}

fn gpu_shape_regex() -> &'static Regex {
    GPU_SHAPE_REGEX.get_or_init(|| Regex::new(r"GPU").expect("Invalid Regex"))
}

/// Normalize a Kubernetes version for use inside a name pattern.
///
/// Strips the leading `v` and escapes the dots so version separators do not
/// act as wildcards.
pub fn format_version(input: &str) -> String {
    regex::escape(input.trim_start_matches('v'))
}

/// Select the image OCID matching the node shape and Kubernetes version.
///
/// Arm flex shapes take aarch64 images, GPU shapes take GPU images, and
/// every other shape takes the plain Oracle Linux image (one whose name
/// carries neither marker). The first matching candidate wins; candidates
/// are checked in input order.
pub fn select_node_image(
    sources: &[ImageSource],
    shape: &str,
    kubernetes_version: &str,
) -> Result<String, ImageError> {
    let version = format_version(kubernetes_version);

    let (pattern, exclude_variants) = if arm_shape_regex().is_match(shape) {
        (format!("(Oracle-Linux).*?(aarch64).*?({version})"), false)
    } else if gpu_shape_regex().is_match(shape) {
        (format!("(Oracle-Linux).*?(GPU).*?({version})"), false)
    } else {
        // Plain shapes must not pick up a GPU or aarch64 build.
        (format!("(Oracle-Linux).*?({version})"), true)
    };
    let pattern = Regex::new(&pattern)?;

    let selected = sources.iter().find(|s| {
        pattern.is_match(&s.source_name)
            && !(exclude_variants
                && (s.source_name.contains("GPU") || s.source_name.contains("aarch64")))
    });

    match selected {
        Some(source) => {
            log::debug!(
                "selected image '{}' ({}) for shape {shape}",
                source.source_name,
                source.image_id
            );
            Ok(source.image_id.clone())
        }
        None => Err(ImageError::NoMatchingImage {
            shape: shape.to_string(),
            version: kubernetes_version.to_string(),
        }),
    }
}
