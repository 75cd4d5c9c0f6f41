//! Variant resolution: derives every build parameter of a [`Variant`].
//!
//! All functions here are pure. Era-dependent conventions live in the
//! static rule tables below, one table per convention, so each historical
//! special case can be audited on its own.

use dockergen_core::{
    Arch, Edition, Error, Product, Result, Variant, VersionCustomizations, numeric_version,
    version_suffix,
};

use crate::rules::{Rule, RuleTable};

const RELEASES_URL: &str = "https://packages.couchbase.com/releases";
const STAGING_RELEASES_URL: &str = "http://packages-staging.couchbase.com/releases";
const SYNC_GATEWAY_URL: &str = "http://packages.couchbase.com/releases/couchbase-sync-gateway";
const STAGING_SYNC_GATEWAY_URL: &str =
    "http://packages-staging.couchbase.com/releases/couchbase-sync-gateway";

/// Ubuntu release the Server image is based on.
pub static SERVER_UBUNTU: RuleTable<&str> = RuleTable {
    rules: &[
        Rule::between(40000, 49999, "14.04"),
        Rule::between(50000, 59999, "16.04"),
        Rule::exactly(60000, "16.04"),
        Rule::between(60001, 60099, "18.04"),
        Rule::between(60500, 60599, "18.04"),
        Rule::between(60600, 60601, "18.04"),
    ],
    // 7.x and 6.6.2+
    fallback: "20.04",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPackaging {
    /// `couchbase-server-<ed>_<ver>-ubuntu<os>_amd64.deb`, amd64 only.
    UbuntuQualified,
    /// `couchbase-server-<ed>_<ver>-linux_<arch>.deb`, from 7.1.0 on.
    Linux,
}

pub static SERVER_PACKAGING: RuleTable<ServerPackaging> = RuleTable {
    rules: &[
        Rule::at_least(70100, ServerPackaging::Linux),
        Rule::at_most(70099, ServerPackaging::UbuntuQualified),
    ],
    fallback: ServerPackaging::Linux,
};

/// 6.5.0 (Mad Hatter) dropped the Python 2 binding.
pub static SERVER_EXTRA_DEPS: RuleTable<&str> = RuleTable {
    rules: &[
        Rule::at_least(60500, "bzip2 runit"),
        Rule::at_most(60499, "python-httplib2 runit"),
    ],
    fallback: "bzip2 runit",
};

/// Base images older than 7.0.0 need the systemd workaround script.
pub static SERVER_SYSTEMD_WORKAROUND: RuleTable<bool> = RuleTable {
    rules: &[Rule::at_most(69999, true), Rule::at_least(70000, false)],
    fallback: false,
};

pub static SYNC_GATEWAY_BASE_IMAGE: RuleTable<&str> = RuleTable {
    rules: &[
        Rule::at_most(30003, "centos:centos7"),
        Rule::at_least(30004, "ubuntu:22.04"),
    ],
    fallback: "ubuntu:22.04",
};

/// Package format: RPM up to 3.0.3, DEB afterwards.
pub static SYNC_GATEWAY_PACKAGE_EXT: RuleTable<&str> = RuleTable {
    rules: &[Rule::at_most(30003, "rpm"), Rule::at_least(30004, "deb")],
    fallback: "deb",
};

const FORESTDB: &str = "forestdb";
const FORESTDB_IMAGE: &str = "tleyden5iwx/forestdb";

/// Where and under which name a variant's package is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub filename: String,
    pub url: String,
}

/// Resolves build parameters, consulting the injected customization table
/// before any naming rule.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    customizations: VersionCustomizations,
}

impl Resolver {
    pub fn new(customizations: VersionCustomizations) -> Self {
        Self { customizations }
    }

    pub fn customizations(&self) -> &VersionCustomizations {
        &self.customizations
    }

    /// Numeric version, or `None` (logged) when malformed. Rule tables fall
    /// back to their default for `None`.
    pub fn numeric(&self, variant: &Variant) -> Option<u64> {
        match numeric_version(&variant.version) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(error = %e, product = %variant.product, "using default rules");
                None
            }
        }
    }

    pub fn base_image(&self, variant: &Variant) -> Result<String> {
        match &variant.product {
            Product::Server => Ok(format!("ubuntu:{}", self.ubuntu_version(variant))),
            Product::SyncGateway => {
                if variant.version.contains(FORESTDB) {
                    return Ok(FORESTDB_IMAGE.to_owned());
                }
                Ok(SYNC_GATEWAY_BASE_IMAGE
                    .select(self.numeric(variant))
                    .to_owned())
            }
            Product::Sandbox => Ok(format!("couchbase/server:{}", variant.version)),
            Product::Other(name) => Err(Error::UnregisteredProduct(name.clone())),
        }
    }

    /// Ubuntu release for the Server image. Meaningless for other products.
    pub fn ubuntu_version(&self, variant: &Variant) -> &'static str {
        SERVER_UBUNTU.select(self.numeric(variant))
    }

    /// Package filename and download URL. A customization entry for the
    /// variant wins unconditionally.
    pub fn package_descriptor(&self, variant: &Variant, arch: Arch) -> Result<PackageDescriptor> {
        if let Some(custom) = self.customizations.get(variant) {
            tracing::debug!(key = %variant.customization_key(), "using customized package");
            return Ok(PackageDescriptor {
                filename: custom.package_filename.clone(),
                url: custom.package_url.clone(),
            });
        }

        match &variant.product {
            Product::Server => {
                let filename = self.server_package_file(variant, arch);
                let url = format!("{}/{filename}", self.release_url(variant));
                Ok(PackageDescriptor { filename, url })
            }
            Product::SyncGateway => {
                let filename = self.sync_gateway_package_file(variant);
                let base = if variant.is_staging {
                    STAGING_SYNC_GATEWAY_URL
                } else {
                    SYNC_GATEWAY_URL
                };
                let url = format!("{base}/{}/{filename}", variant.version);
                Ok(PackageDescriptor { filename, url })
            }
            Product::Sandbox => Err(Error::NoPackage(variant.product.to_string())),
            Product::Other(name) => Err(Error::UnregisteredProduct(name.clone())),
        }
    }

    fn server_package_file(&self, variant: &Variant, arch: Arch) -> String {
        match SERVER_PACKAGING.select(self.numeric(variant)) {
            ServerPackaging::Linux => format!(
                "{}-{}_{}-linux_{arch}.deb",
                variant.product, variant.edition, variant.version
            ),
            ServerPackaging::UbuntuQualified => format!(
                "{}-{}_{}-ubuntu{}_amd64.deb",
                variant.product,
                variant.edition,
                variant.version,
                self.ubuntu_version(variant)
            ),
        }
    }

    fn sync_gateway_package_file(&self, variant: &Variant) -> String {
        let ext = SYNC_GATEWAY_PACKAGE_EXT.select(self.numeric(variant));
        format!(
            "couchbase-sync-gateway-{}_{}_{}.{ext}",
            variant.edition,
            variant.version,
            Arch::Generic
        )
    }

    /// Debian package name installed by the Server image.
    pub fn server_package_name(&self, variant: &Variant) -> &'static str {
        match variant.edition {
            Edition::Community => "couchbase-server-community",
            Edition::Enterprise => "couchbase-server",
        }
    }

    /// Space-separated OS packages the image installs besides the product.
    pub fn extra_dependencies(&self, variant: &Variant) -> &'static str {
        match variant.product {
            Product::Server => SERVER_EXTRA_DEPS.select(self.numeric(variant)),
            _ => "",
        }
    }

    pub fn systemd_workaround(&self, variant: &Variant) -> bool {
        match variant.product {
            Product::Server => SERVER_SYSTEMD_WORKAROUND.select(self.numeric(variant)),
            _ => false,
        }
    }

    pub fn release_url(&self, variant: &Variant) -> String {
        let base = if variant.is_staging {
            STAGING_RELEASES_URL
        } else {
            RELEASES_URL
        };
        format!("{base}/{}", variant.version)
    }

    /// Every Server image is Ubuntu based.
    pub fn pkg_command(&self, _variant: &Variant) -> &'static str {
        "apt-get"
    }

    /// Version string as the template shows it. Sync Gateway feature builds
    /// (`0.0.0-forestdb`) become branch names (`feature/forestdb`).
    pub fn version_with_substitutions(&self, variant: &Variant) -> String {
        match variant.product {
            Product::SyncGateway if version_suffix(&variant.version) == FORESTDB => {
                format!("feature/{FORESTDB}")
            }
            _ => variant.version.clone(),
        }
    }
}
