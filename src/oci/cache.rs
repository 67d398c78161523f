//! Cache management for provider query results.
//!
//! Image listings and availability domains change rarely; both are cached
//! to dated JSON files so repeated runs avoid the CLI round trip.

use super::query::{run_availability_domains, run_node_pool_options};
use crate::models::{AvailabilityDomain, NodePoolOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::path::Path;

/// Read a value from a cache file, or fetch and cache it.
///
/// If `cache_file` is given it must exist; otherwise a dated default name is
/// used and a miss falls through to `fetch`.
fn read_or_fetch<T, F>(
    cache_file: Option<&str>,
    default_stem: &str,
    fetch: F,
) -> Result<T, Box<dyn Error>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn Error>>,
{
    let today = chrono::Utc::now().format("%Y-%m-%d");

    let cache_file = match cache_file {
        Some(file) => {
            if !Path::new(file).exists() {
                return Err(format!("Cache file does not exist: {file}").into());
            }
            log::info!("Using provided cache file: {file}");
            file.to_string()
        }
        None => format!("{default_stem}_{today}.json"),
    };

    let value = match std::fs::read_to_string(&cache_file) {
        Ok(json) => {
            log::info!("Reading from cache file: {cache_file}");
            serde_json::from_str(&json).map_err(|e| format!("Error parsing cache JSON: {e}"))?
        }
        Err(_) => {
            log::warn!("Cache file not found: {cache_file}");
            let value = fetch()?;

            let json = serde_json::to_string(&value)
                .map_err(|e| format!("Error serializing JSON: {e}"))?;
            log::warn!("Writing data to cache file: {cache_file}");
            std::fs::write(&cache_file, json)
                .map_err(|e| format!("Error writing cache file {cache_file}: {e}"))?;
            value
        }
    };

    Ok(value)
}

/// Node-pool image options, cached.
pub fn read_node_pool_options(
    compartment_id: &str,
    cache_file: Option<&str>,
) -> Result<NodePoolOptions, Box<dyn Error>> {
    read_or_fetch(cache_file, "node_pool_options_cache", || {
        run_node_pool_options(compartment_id)
    })
}

/// Availability domains, cached.
pub fn read_availability_domains(
    compartment_id: &str,
    cache_file: Option<&str>,
) -> Result<Vec<AvailabilityDomain>, Box<dyn Error>> {
    read_or_fetch(cache_file, "availability_domains_cache", || {
        run_availability_domains(compartment_id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_node_pool_options_fixture() {
        let options = read_node_pool_options(
            "unused",
            Some("src/tests/test_data/node_pool_options_01.json"),
        )
        .expect("Error reading node pool options cache");
        assert_eq!(options.sources.len(), 3);
        assert_eq!(
            options.sources[0].source_name,
            "Oracle-Linux-8.9-aarch64-2024.01.26-0-OKE-1.30.1-679"
        );
    }

    #[test]
    fn test_read_availability_domains_fixture() {
        let ads = read_availability_domains(
            "unused",
            Some("src/tests/test_data/availability_domains_01.json"),
        )
        .expect("Error reading availability domain cache");
        assert_eq!(ads.len(), 3);
        assert_eq!(ads[0].name, "Uocm:PHX-AD-1");
    }

    #[test]
    fn test_missing_explicit_cache_is_an_error() {
        let err = read_node_pool_options("unused", Some("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
