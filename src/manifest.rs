//! Loading and lookups for the versions.yaml source-of-truth manifest.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub platform: PlatformPin,
    pub plugins: BTreeMap<String, PluginPin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformPin {
    pub version: String,
    pub digest_index: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginPin {
    pub version: String,
    pub pypi: String,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("missing manifest {}", path.display());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest {}", path.display()))?;
        let manifest = serde_yaml::from_str(&content)
            .with_context(|| format!("parse manifest {}", path.display()))?;
        Ok(manifest)
    }

    /// Point-of-use lookup: a plugin key a rewriter needs but the manifest
    /// lacks fails here, naming the key.
    pub fn plugin(&self, key: &str) -> Result<&PluginPin> {
        self.plugins
            .get(key)
            .with_context(|| format!("manifest has no plugins.{key} entry"))
    }
}
