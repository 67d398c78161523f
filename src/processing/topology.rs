//! Network topology derivation.
//!
//! Turns the VCN address block into an explicit role -> CIDR mapping. This
//! is the only place where subnet order matters: positions in the calculated
//! list are bound to [`SubnetRole`]s here, and every other part of the crate
//! looks subnets up by role.

use crate::models::{Cidr, CidrError, SubnetRole};
use crate::processing::calculate_subnets;
use std::collections::BTreeMap;

/// The VCN block and the CIDR assigned to each subnet role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTopology {
    /// The parent VCN address block.
    pub vcn_cidr: Cidr,
    roles: BTreeMap<SubnetRole, Cidr>,
}

impl NetworkTopology {
    /// Derive the topology from a VCN address block.
    ///
    /// Allocates one equal-sized subnet per role in [`SubnetRole::ALL`]
    /// order. The mapping is fixed once built; callers must never re-derive
    /// role assignments from subnet addresses.
    pub fn derive(vcn_cidr: Cidr) -> Result<NetworkTopology, CidrError> {
        let subnets = calculate_subnets(vcn_cidr, SubnetRole::ALL.len() as u32)?;
        let roles = SubnetRole::ALL.iter().copied().zip(subnets).collect();
        Ok(NetworkTopology {
            vcn_cidr: vcn_cidr.network(),
            roles,
        })
    }

    /// The CIDR assigned to a role.
    pub fn cidr(&self, role: SubnetRole) -> Cidr {
        // Every role is populated by derive(); the map is never partial.
        self.roles[&role]
    }

    /// Role/CIDR pairs for the roles that become VCN subnets.
    pub fn subnet_roles(&self) -> impl Iterator<Item = (SubnetRole, Cidr)> + '_ {
        SubnetRole::SUBNETS
            .iter()
            .map(move |role| (*role, self.cidr(*role)))
    }
}

impl std::fmt::Display for NetworkTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "vcn {}", self.vcn_cidr)?;
        for (role, cidr) in &self.roles {
            writeln!(f, "  {role}: {cidr}")?;
        }
        Ok(())
    }
}
