//! Lake registry loaded from TOML site data

use crate::config::{LakeSite, LakeTypeConfig};
use std::collections::HashMap;
use stillwater_core::{LakeId, Result, StillwaterError};

/// All known lakes, keyed by stable id.
///
/// Parsed from a TOML document of the form:
///
/// ```toml
/// [[lakes]]
/// title = "Lake Bled"
/// longitude = 14.1
/// latitude = 46.36
/// type = "alpine glacial"
/// ```
pub struct LakeRegistry {
    sites: HashMap<LakeId, LakeSite>,
    /// Insertion order, for stable UI listing
    order: Vec<LakeId>,
}

#[derive(serde::Deserialize)]
struct SiteFile {
    #[serde(default)]
    lakes: Vec<LakeSite>,
}

impl LakeRegistry {
    pub fn new() -> Self {
        Self {
            sites: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Parse a registry from TOML site data. Ids are assigned in file order.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: SiteFile =
            toml::from_str(text).map_err(|e| StillwaterError::TomlParseError(e.to_string()))?;
        let mut registry = Self::new();
        for site in file.lakes {
            registry.insert(site);
        }
        Ok(registry)
    }

    /// Add a site, returning its assigned id
    pub fn insert(&mut self, site: LakeSite) -> LakeId {
        let id = LakeId::new();
        self.sites.insert(id, site);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: LakeId) -> Option<&LakeSite> {
        self.sites.get(&id)
    }

    /// Lookup that surfaces the configuration-error taxonomy for callers
    /// that want to log and no-op
    pub fn require(&self, id: LakeId) -> Result<&LakeSite> {
        self.sites
            .get(&id)
            .ok_or_else(|| StillwaterError::LakeNotFound(id.to_string()))
    }

    pub fn type_config(&self, id: LakeId) -> Option<LakeTypeConfig> {
        self.sites.get(&id).map(|s| s.type_config())
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Iterate ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = LakeId> + '_ {
        self.order.iter().copied()
    }
}

impl Default for LakeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
