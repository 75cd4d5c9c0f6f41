use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

const STAGING_SUFFIX: &str = "-staging";

/// Packaging edition of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Community,
    Enterprise,
}

impl Edition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "community" => Ok(Self::Community),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(Error::UnknownEdition(s.to_owned())),
        }
    }
}

/// A product the repository publishes images for.
///
/// Keyed by its directory name. Names the resolver has no rules for are
/// kept as [`Product::Other`] so discovery and configuration can carry them;
/// resolving such a variant fails with [`Error::UnregisteredProduct`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Product {
    Server,
    SyncGateway,
    Sandbox,
    Other(String),
}

impl Product {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Server => "couchbase-server",
            Self::SyncGateway => "sync-gateway",
            Self::Sandbox => "server-sandbox",
            Self::Other(name) => name,
        }
    }

    pub fn is_registered(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Product {
    fn from(name: &str) -> Self {
        match name {
            "couchbase-server" => Self::Server,
            "sync-gateway" => Self::SyncGateway,
            "server-sandbox" => Self::Sandbox,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Product {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Product> for String {
    fn from(product: Product) -> Self {
        product.as_str().to_owned()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Docker's architecture names.
///
/// [`Arch::Generic`] renders as `@@ARCH@@`, which the Dockerfile replaces
/// with the real architecture at image build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    Arm64,
    Generic,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Generic => "@@ARCH@@",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amd64" => Ok(Self::Amd64),
            "arm64" => Ok(Self::Arm64),
            "@@ARCH@@" => Ok(Self::Generic),
            _ => Err(Error::UnknownArch(s.to_owned())),
        }
    }
}

/// One generation target: product × edition × version × architectures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub edition: Edition,
    pub product: Product,
    /// Upstream version as it appears in download URLs and package names.
    pub version: String,
    /// Version of the image, i.e. the directory name in the repository.
    /// Equal to `version` except for rebuilds from a different upstream tag.
    pub target_version: String,
    pub arches: Vec<Arch>,
    pub is_staging: bool,
    /// Template file name under `templates/<product>/`.
    pub template_file: String,
    /// Explicit output directory; `None` means the repository layout.
    pub output_dir: Option<PathBuf>,
    /// Template values applied after the resolved parameters.
    pub template_overrides: BTreeMap<String, String>,
}

impl Variant {
    /// Builds the baseline variant for a version directory name.
    ///
    /// A trailing `-staging` is stripped into [`Variant::is_staging`].
    pub fn new(edition: Edition, product: Product, dir_name: &str) -> Self {
        let (version, is_staging) = match dir_name.strip_suffix(STAGING_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (dir_name, false),
        };

        Self {
            edition,
            product,
            version: version.to_owned(),
            target_version: version.to_owned(),
            arches: vec![Arch::Amd64],
            is_staging,
            template_file: "Dockerfile.template".to_owned(),
            output_dir: None,
            template_overrides: BTreeMap::new(),
        }
    }

    /// Key into the version customization table:
    /// `<product>_<edition>_<version>`.
    pub fn customization_key(&self) -> String {
        format!("{}_{}_{}", self.product, self.edition, self.version)
    }

    pub fn is_multiarch(&self) -> bool {
        self.arches.len() > 1
    }

    /// Directory name of the image: target version plus `-staging` when
    /// applicable.
    pub fn dir_name(&self) -> String {
        if self.is_staging {
            format!("{}{STAGING_SUFFIX}", self.target_version)
        } else {
            self.target_version.clone()
        }
    }
}
