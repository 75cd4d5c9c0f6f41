use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse version customizations at {path}")]
    CustomizationsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("embedded version customizations are invalid")]
    EmbeddedCustomizations { source: serde_json::Error },

    #[error("invalid skip pattern for {product}: {pattern:?}")]
    InvalidSkipPattern {
        product: String,
        pattern: String,
        source: regex::Error,
    },

    // ── Domain values ──
    #[error("unknown edition {0:?}, expected community or enterprise")]
    UnknownEdition(String),

    #[error("unknown architecture {0:?}")]
    UnknownArch(String),

    #[error("product {0:?} is not registered with the resolver")]
    UnregisteredProduct(String),

    #[error("product {0:?} does not publish a package of its own")]
    NoPackage(String),

    #[error("malformed version {version:?}: {reason}")]
    MalformedVersion {
        version: String,
        reason: &'static str,
    },
}
