use std::path::PathBuf;

use crate::deploy::DeployError;
use crate::discover::DiscoverError;
use crate::template::TemplateError;

/// Fatal generation failures. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to resolve {variant}")]
    Resolve {
        variant: String,
        source: dockergen_core::Error,
    },
    #[error(transparent)]
    Config(#[from] dockergen_core::Error),
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Deploy(#[from] DeployError),
    #[error("failed to write Dockerfile at {path}")]
    WriteDockerfile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("README.md missing for {product} at {path}")]
    MissingReadme { product: String, path: PathBuf },
}
