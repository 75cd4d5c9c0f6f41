//! Explicit package locations for unreleased or otherwise special builds.
//!
//! The table is keyed by [`Variant::customization_key`] and loaded once per
//! run. It is immutable after loading and handed to the resolver.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Variant;

/// Location of the optional repository-local table, relative to the root.
pub const CUSTOMIZATIONS_FILE: &str = "generate/version_customizations.json";

const EMBEDDED: &str = include_str!("../data/version_customizations.json");

/// Package coordinates that replace the derived ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCustomization {
    pub package_url: String,
    pub package_filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCustomizations {
    entries: BTreeMap<String, VersionCustomization>,
}

impl VersionCustomizations {
    /// The table shipped with dockergen.
    pub fn embedded() -> crate::Result<Self> {
        let entries = serde_json::from_str(EMBEDDED)
            .map_err(|e| crate::Error::EmbeddedCustomizations { source: e })?;
        Ok(Self { entries })
    }

    /// Embedded table merged with `generate/version_customizations.json`
    /// under `root`, when present. Repository entries win on conflict.
    pub fn load(root: &Path) -> crate::Result<Self> {
        let mut table = Self::embedded()?;
        let path = root.join(CUSTOMIZATIONS_FILE);
        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::ConfigLoad {
                path: path.clone(),
                source: e,
            })?;
            let extra: BTreeMap<String, VersionCustomization> = serde_json::from_str(&content)
                .map_err(|e| crate::Error::CustomizationsParse {
                    path: path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %path.display(), entries = extra.len(), "loaded version customizations");
            table.entries.extend(extra);
        }
        Ok(table)
    }

    pub fn get(&self, variant: &Variant) -> Option<&VersionCustomization> {
        self.entries.get(&variant.customization_key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, VersionCustomization)> for VersionCustomizations {
    fn from_iter<I: IntoIterator<Item = (String, VersionCustomization)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
