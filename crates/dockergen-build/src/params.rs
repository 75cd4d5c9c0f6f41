use std::collections::BTreeMap;

use dockergen_core::{Arch, Error, Product, Result, Variant};
use dockergen_fetch::{ChecksumClient, HttpFetcher};
use serde::Serialize;

use crate::resolve::Resolver;

/// A single template variable. Booleans drive `{{#if ...}}` blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Str(String),
    Bool(bool),
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

pub type TemplateParams = BTreeMap<String, TemplateValue>;

/// Resolves the full parameter set for `variant`'s template, including the
/// published checksums, then applies the variant's explicit overrides.
pub async fn template_params<F: HttpFetcher>(
    resolver: &Resolver,
    checksums: &ChecksumClient<F>,
    variant: &Variant,
) -> Result<TemplateParams> {
    let mut params = TemplateParams::new();
    let mut set = |key: &str, value: TemplateValue| {
        params.insert(key.to_owned(), value);
    };

    match &variant.product {
        Product::Server => {
            let package = resolver.package_descriptor(variant, Arch::Generic)?;
            let arm64 = resolver.package_descriptor(variant, Arch::Arm64)?;
            let amd64 = resolver.package_descriptor(variant, Arch::Amd64)?;

            set("CB_VERSION", resolver.version_with_substitutions(variant).into());
            set("CB_PACKAGE", package.filename.into());
            set("CB_PACKAGE_NAME", resolver.server_package_name(variant).into());
            set("CB_EXTRA_DEPS", resolver.extra_dependencies(variant).into());
            set("CB_SHA256_arm64", checksums.sha256(&arm64.url).await.into());
            set("CB_SHA256_amd64", checksums.sha256(&amd64.url).await.into());
            set("CB_RELEASE_URL", resolver.release_url(variant).into());
            set("DOCKER_BASE_IMAGE", resolver.base_image(variant)?.into());
            set("PKG_COMMAND", resolver.pkg_command(variant).into());
            set("SYSTEMD_WORKAROUND", resolver.systemd_workaround(variant).into());
            set("CB_MULTIARCH", variant.is_multiarch().into());
            set("CB_SKIP_CHECKSUM", "false".into());
        }
        Product::SyncGateway => {
            let package = resolver.package_descriptor(variant, Arch::Generic)?;

            set("SYNC_GATEWAY_PACKAGE_URL", package.url.into());
            set("SYNC_GATEWAY_PACKAGE_FILENAME", package.filename.into());
            set("SYNC_GATEWAY_VERSION", resolver.version_with_substitutions(variant).into());
            set("DOCKER_BASE_IMAGE", resolver.base_image(variant)?.into());
        }
        Product::Sandbox => {
            set("CB_VERSION", resolver.version_with_substitutions(variant).into());
            set("DOCKER_BASE_IMAGE", resolver.base_image(variant)?.into());
            set("CB_MULTIARCH", variant.is_multiarch().into());
        }
        Product::Other(name) => return Err(Error::UnregisteredProduct(name.clone())),
    }

    for (key, value) in &variant.template_overrides {
        params.insert(key.clone(), value.as_str().into());
    }

    tracing::debug!(?params, "resolved template parameters");
    Ok(params)
}
