use std::collections::BTreeMap;
use std::path::Path;

use dockergen_build::{Outcome, Pipeline};
use dockergen_core::{Edition, Product};

/// Scans the repository and generates every missing Dockerfile.
pub async fn generate_all(root: &Path) -> anyhow::Result<()> {
    let pipeline = Pipeline::load(root)?;
    let report = pipeline.generate_all().await?;

    tracing::info!(
        generated = report.generated,
        already_present = report.already_present,
        skipped = report.skipped,
        "generation complete"
    );
    Ok(())
}

/// Generates one product/version/edition into `output`.
pub async fn generate_one(
    root: &Path,
    product: &str,
    version: &str,
    edition: Edition,
    output: &Path,
    template_args: Vec<(String, String)>,
) -> anyhow::Result<()> {
    if !output.is_dir() {
        anyhow::bail!("output directory {} does not exist", output.display());
    }

    let product = Product::from(product);
    if !product.is_registered() {
        anyhow::bail!(
            "product '{product}' is not registered; expected couchbase-server, sync-gateway or server-sandbox"
        );
    }

    let overrides: BTreeMap<String, String> = template_args.into_iter().collect();
    let pipeline = Pipeline::load(root)?;
    let outcome = pipeline
        .generate_one(edition, product, version, output, overrides)
        .await?;

    if outcome == Outcome::AlreadyPresent {
        tracing::info!(dir = %output.display(), "Dockerfile already present, README refreshed");
    }
    Ok(())
}

/// Parses a `-t KEY=VALUE` template argument.
pub fn parse_template_arg(arg: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = arg.split('=').collect();
    match parts.as_slice() {
        [key, value] if !key.is_empty() => Ok(((*key).to_owned(), (*value).to_owned())),
        _ => Err(format!("'{arg}' not of form KEY=VALUE")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value() {
        assert_eq!(
            parse_template_arg("CB_VERSION=7.1.1").unwrap(),
            ("CB_VERSION".to_owned(), "7.1.1".to_owned())
        );
        assert_eq!(
            parse_template_arg("CB_EXTRA_DEPS=").unwrap(),
            ("CB_EXTRA_DEPS".to_owned(), String::new())
        );
    }

    #[test]
    fn rejects_missing_or_repeated_separator() {
        assert!(parse_template_arg("CB_VERSION").is_err());
        assert!(parse_template_arg("A=B=C").is_err());
        assert!(parse_template_arg("=value").is_err());
    }
}
