use crate::{NetworkProfile, format_chain_id};
use std::collections::BTreeMap;

/// Errors returned by [`NetworkRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no network profile registered for chain {}", format_chain_id(*.0))]
    NotFound(u64),
    #[error("a network profile for chain {} is already registered", format_chain_id(*.0))]
    Duplicate(u64),
}

/// Immutable set of known networks, keyed by chain id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRegistry {
    profiles: BTreeMap<u64, NetworkProfile>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::polygon()
    }
}

impl NetworkRegistry {
    /// A registry with no profiles.
    pub fn empty() -> Self {
        Self { profiles: BTreeMap::new() }
    }

    /// The built-in Polygon mainnet and Mumbai testnet profiles.
    pub fn polygon() -> Self {
        let profiles = [NetworkProfile::polygon_mainnet(), NetworkProfile::polygon_mumbai()];
        Self { profiles: profiles.into_iter().map(|p| (p.chain_id, p)).collect() }
    }

    /// Adds a profile, rejecting a chain id that is already present.
    pub fn with(mut self, profile: NetworkProfile) -> Result<Self, RegistryError> {
        if self.profiles.contains_key(&profile.chain_id) {
            return Err(RegistryError::Duplicate(profile.chain_id));
        }
        self.profiles.insert(profile.chain_id, profile);
        Ok(self)
    }

    /// Extends the registry with all `profiles`.
    pub fn extend(
        self,
        profiles: impl IntoIterator<Item = NetworkProfile>,
    ) -> Result<Self, RegistryError> {
        profiles.into_iter().try_fold(self, Self::with)
    }

    /// Looks up the profile for `chain_id`.
    pub fn get_profile(&self, chain_id: u64) -> Result<&NetworkProfile, RegistryError> {
        self.profiles.get(&chain_id).ok_or(RegistryError::NotFound(chain_id))
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.profiles.contains_key(&chain_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
