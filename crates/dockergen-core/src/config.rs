use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Edition, Product};

/// Location of the optional config file, relative to the repository root.
pub const CONFIG_FILE: &str = "generate/dockergen.toml";

/// dockergen.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Editions scanned in batch mode, in order
    #[serde(default = "default_editions")]
    pub editions: Vec<Edition>,
    /// Products scanned in batch mode, in order
    #[serde(default = "default_products")]
    pub products: Vec<Product>,
    /// Per-product regex of versions whose Dockerfiles are maintained by
    /// hand and must never be regenerated
    #[serde(default = "default_skip")]
    pub skip: BTreeMap<Product, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            editions: default_editions(),
            products: default_products(),
            skip: default_skip(),
        }
    }
}

impl GeneratorConfig {
    /// Load from `generate/dockergen.toml` under the repository root, or
    /// return defaults if not found.
    pub fn load(root: &Path) -> crate::Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            Self::parse(&content, config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    fn parse(content: &str, path: PathBuf) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::ConfigParse { path, source: e })
    }

    /// Compiles the skip patterns.
    pub fn skip_filter(&self) -> crate::Result<SkipFilter> {
        let mut patterns = BTreeMap::new();
        for (product, pattern) in &self.skip {
            let regex = Regex::new(pattern).map_err(|e| crate::Error::InvalidSkipPattern {
                product: product.to_string(),
                pattern: pattern.clone(),
                source: e,
            })?;
            patterns.insert(product.clone(), regex);
        }
        Ok(SkipFilter { patterns })
    }
}

/// Versions excluded from regeneration, per product.
#[derive(Debug, Clone, Default)]
pub struct SkipFilter {
    patterns: BTreeMap<Product, Regex>,
}

impl SkipFilter {
    /// True if `version` of `product` must be left alone.
    pub fn matches(&self, product: &Product, version: &str) -> bool {
        self.patterns
            .get(product)
            .is_some_and(|re| re.is_match(version))
    }
}

fn default_editions() -> Vec<Edition> {
    vec![Edition::Community, Edition::Enterprise]
}

fn default_products() -> Vec<Product> {
    vec![Product::Server, Product::SyncGateway, Product::Sandbox]
}

fn default_skip() -> BTreeMap<Product, String> {
    // 1.x and 2.0.x Sync Gateway images are hand-maintained.
    BTreeMap::from([(Product::SyncGateway, r"^(1\.|2\.0\.).+$".to_owned())])
}
