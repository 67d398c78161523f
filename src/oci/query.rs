//! OCI CLI queries for node-pool options and availability domains.

use super::cli;
use crate::models::{AvailabilityDomain, NodePoolOptions};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::error::Error;

/// Standard `oci` CLI response envelope.
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    data: T,
}

fn run_and_parse<T: DeserializeOwned>(cmd: &str) -> Result<T, Box<dyn Error>> {
    let output = cli::run(cmd)?;
    let envelope: Envelope<T> = serde_json::from_str(&output).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        format!("Error parsing CLI JSON: {e}")
    })?;
    Ok(envelope.data)
}

/// Fetch the node-pool image options for a compartment.
pub fn run_node_pool_options(compartment_id: &str) -> Result<NodePoolOptions, Box<dyn Error>> {
    let cmd = format!(
        "oci ce node-pool-options get --node-pool-option-id all \
         --compartment-id {compartment_id} --output json"
    );
    let options: NodePoolOptions = run_and_parse(&cmd)?;
    log::info!("fetched {} node image sources", options.sources.len());
    Ok(options)
}

/// Fetch the availability domains for a compartment.
pub fn run_availability_domains(
    compartment_id: &str,
) -> Result<Vec<AvailabilityDomain>, Box<dyn Error>> {
    let cmd = format!(
        "oci iam availability-domain list --compartment-id {compartment_id} --output json"
    );
    let ads: Vec<AvailabilityDomain> = run_and_parse(&cmd)?;
    log::info!("fetched {} availability domains", ads.len());
    Ok(ads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parsing() {
        let json = r#"{
            "data": {
                "sources": [
                    {
                        "source-name": "Oracle-Linux-8.9-2024.01.26-0-OKE-1.30.1-679",
                        "image-id": "ocid1.image.oc1..x86",
                        "source-type": "IMAGE"
                    }
                ]
            }
        }"#;
        let envelope: Envelope<NodePoolOptions> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.sources.len(), 1);
        assert_eq!(envelope.data.sources[0].image_id, "ocid1.image.oc1..x86");
    }

    #[test]
    fn test_ad_envelope_parsing() {
        let json = r#"{ "data": [ { "name": "Uocm:PHX-AD-1" }, { "name": "Uocm:PHX-AD-2" } ] }"#;
        let envelope: Envelope<Vec<AvailabilityDomain>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[1].name, "Uocm:PHX-AD-2");
    }
}
