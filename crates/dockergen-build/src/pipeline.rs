use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dockergen_core::{
    Arch, Edition, GeneratorConfig, Product, SkipFilter, Variant, VersionCustomizations,
    numeric_version,
};
use dockergen_fetch::{ChecksumClient, HttpFetcher, ReqwestFetcher};

use crate::deploy;
use crate::discover::version_subdirectories;
use crate::error::GenerateError;
use crate::params::template_params;
use crate::resolve::Resolver;
use crate::rules::{Rule, RuleTable};
use crate::template;

const DOCKERFILE: &str = "Dockerfile";
const README: &str = "README.md";
const RESOURCE_SUBDIRS: &[&str] = &["scripts", "config"];

/// 7.0.3 images build from 7.0.3-MP1 for the complete Log4Shell remediation.
static SERVER_UPSTREAM_TAG: RuleTable<Option<&str>> = RuleTable {
    rules: &[Rule::exactly(70003, Some("7.0.3-MP1"))],
    fallback: None,
};

static SERVER_ARM64: RuleTable<bool> = RuleTable {
    rules: &[Rule::at_least(70100, true)],
    fallback: false,
};

// Matches 7.10.0 and up, not 7.1.0.
static SANDBOX_ARM64: RuleTable<bool> = RuleTable {
    rules: &[Rule::at_least(71000, true)],
    fallback: false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SyncGatewayLayout {
    template: &'static str,
    arm64: bool,
}

/// Images up to 3.0.3 were CentOS based and amd64 only.
static SYNC_GATEWAY_LAYOUT: RuleTable<SyncGatewayLayout> = RuleTable {
    rules: &[Rule::at_most(
        30003,
        SyncGatewayLayout {
            template: "Dockerfile.centos.template",
            arm64: false,
        },
    )],
    fallback: SyncGatewayLayout {
        template: "Dockerfile.ubuntu.template",
        arm64: true,
    },
};

/// Builds the variant for a version directory, applying the per-product
/// structural tweaks: template choice, extra architectures, and upstream
/// tag substitutions.
pub fn construct_variant(edition: Edition, product: Product, dir_name: &str) -> Variant {
    let mut variant = Variant::new(edition, product, dir_name);
    let numeric = match numeric_version(&variant.version) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "constructing variant with default layout");
            None
        }
    };

    match variant.product {
        Product::Server => {
            if let Some(upstream) = SERVER_UPSTREAM_TAG.select(numeric) {
                variant.version = upstream.to_owned();
            }
            if SERVER_ARM64.select(numeric) {
                variant.arches.push(Arch::Arm64);
            }
        }
        Product::SyncGateway => {
            let layout = SYNC_GATEWAY_LAYOUT.select(numeric);
            variant.template_file = layout.template.to_owned();
            if layout.arm64 {
                variant.arches.push(Arch::Arm64);
            }
        }
        Product::Sandbox => {
            if SANDBOX_ARM64.select(numeric) {
                variant.arches.push(Arch::Arm64);
            }
        }
        Product::Other(_) => {}
    }

    variant
}

/// What happened to a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Dockerfile rendered and resources deployed.
    Generated,
    /// Dockerfile was already on disk; only the README was refreshed.
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub generated: usize,
    pub already_present: usize,
    /// Excluded by the skip filter.
    pub skipped: usize,
}

impl GenerationReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Generated => self.generated += 1,
            Outcome::AlreadyPresent => self.already_present += 1,
        }
    }
}

/// Generation pipeline over a docker repository checkout.
///
/// Layout, relative to `root`:
///
/// ```text
/// <edition>/<product>/<version>[-staging]/   output, one per variant
/// generate/templates/<product>/<template>   Dockerfile templates
/// generate/resources/<product>/             scripts/, config/, README.md
/// ```
pub struct Pipeline<F: HttpFetcher = ReqwestFetcher> {
    root: PathBuf,
    config: GeneratorConfig,
    skip: SkipFilter,
    resolver: Resolver,
    checksums: ChecksumClient<F>,
}

impl Pipeline<ReqwestFetcher> {
    /// Loads configuration and customizations from `root` and fetches
    /// checksums over HTTP.
    pub fn load(root: &Path) -> Result<Self, GenerateError> {
        let config = GeneratorConfig::load(root)?;
        let customizations = VersionCustomizations::load(root)?;
        tracing::debug!(entries = customizations.len(), "version customizations loaded");
        Self::with_parts(
            root,
            config,
            Resolver::new(customizations),
            ChecksumClient::new(),
        )
    }
}

impl<F: HttpFetcher> Pipeline<F> {
    pub fn with_parts(
        root: &Path,
        config: GeneratorConfig,
        resolver: Resolver,
        checksums: ChecksumClient<F>,
    ) -> Result<Self, GenerateError> {
        let skip = config.skip_filter()?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
            skip,
            resolver,
            checksums,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generates every discovered version directory of every configured
    /// edition and product.
    pub async fn generate_all(&self) -> Result<GenerationReport, GenerateError> {
        let mut report = GenerationReport::default();

        for edition in &self.config.editions {
            for product in &self.config.products {
                let dir = self.root.join(edition.as_str()).join(product.as_str());
                for dir_name in version_subdirectories(&dir)? {
                    if self.skip.matches(product, &dir_name) {
                        tracing::info!(%product, %edition, version = %dir_name, "skipping generation");
                        report.skipped += 1;
                        continue;
                    }
                    let variant = construct_variant(*edition, product.clone(), &dir_name);
                    report.record(self.generate_variant(&variant).await?);
                }
            }
        }

        Ok(report)
    }

    /// Generates one variant into an explicit, existing directory,
    /// bypassing discovery and the skip filter.
    pub async fn generate_one(
        &self,
        edition: Edition,
        product: Product,
        version: &str,
        output_dir: &Path,
        overrides: BTreeMap<String, String>,
    ) -> Result<Outcome, GenerateError> {
        let mut variant = construct_variant(edition, product, version);
        variant.output_dir = Some(output_dir.to_path_buf());
        variant.template_overrides = overrides;
        self.generate_variant(&variant).await
    }

    /// Renders and deploys `variant` unless its Dockerfile already exists.
    /// The README is refreshed either way.
    pub async fn generate_variant(&self, variant: &Variant) -> Result<Outcome, GenerateError> {
        let target_dir = self.target_dir(variant);
        let dockerfile = target_dir.join(DOCKERFILE);

        let outcome = if dockerfile.exists() {
            tracing::info!(path = %dockerfile.display(), "Dockerfile exists, not regenerating");
            Outcome::AlreadyPresent
        } else {
            self.write_dockerfile(variant, &dockerfile).await?;
            self.deploy_resources(variant, &target_dir)?;
            Outcome::Generated
        };

        self.deploy_readme(variant, &target_dir)?;
        Ok(outcome)
    }

    /// Explicit output directory, or `<root>/<edition>/<product>/<dir>`.
    pub fn target_dir(&self, variant: &Variant) -> PathBuf {
        match &variant.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .root
                .join(variant.edition.as_str())
                .join(variant.product.as_str())
                .join(variant.dir_name()),
        }
    }

    fn template_path(&self, variant: &Variant) -> PathBuf {
        self.root
            .join("generate/templates")
            .join(variant.product.as_str())
            .join(&variant.template_file)
    }

    fn resources_dir(&self, product: &Product) -> PathBuf {
        self.root.join("generate/resources").join(product.as_str())
    }

    async fn write_dockerfile(&self, variant: &Variant, dockerfile: &Path) -> Result<(), GenerateError> {
        tracing::info!(
            product = %variant.product,
            edition = %variant.edition,
            version = %variant.version,
            path = %dockerfile.display(),
            "generating Dockerfile"
        );

        let params = template_params(&self.resolver, &self.checksums, variant)
            .await
            .map_err(|e| GenerateError::Resolve {
                variant: format!("{} {} {}", variant.product, variant.edition, variant.version),
                source: e,
            })?;

        let template_path = self.template_path(variant);
        tracing::debug!(template = %template_path.display(), "rendering");
        let rendered = template::render_file(&template_path, &params)?;

        std::fs::write(dockerfile, rendered).map_err(|e| GenerateError::WriteDockerfile {
            path: dockerfile.to_path_buf(),
            source: e,
        })
    }

    fn deploy_resources(&self, variant: &Variant, target_dir: &Path) -> Result<(), GenerateError> {
        let resources = self.resources_dir(&variant.product);
        for subdir in RESOURCE_SUBDIRS {
            if deploy::copy_dir(&resources.join(subdir), &target_dir.join(subdir))? {
                tracing::debug!(subdir, target = %target_dir.display(), "deployed resources");
            }
        }
        Ok(())
    }

    fn deploy_readme(&self, variant: &Variant, target_dir: &Path) -> Result<(), GenerateError> {
        let source = self.resources_dir(&variant.product).join(README);
        if !source.is_file() {
            return Err(GenerateError::MissingReadme {
                product: variant.product.to_string(),
                path: source,
            });
        }
        deploy::copy_file(&source, &target_dir.join(README))?;
        Ok(())
    }
}
