mod commands;

use std::path::PathBuf;

use clap::Parser;
use dockergen_core::Edition;

/// Generates a single Dockerfile and its resources into an existing
/// directory when `--product` is given; otherwise scans
/// BASE_DIRECTORY/EDITION/PRODUCT/VERSION and fills in every version
/// directory that has no Dockerfile yet.
#[derive(Parser)]
#[command(
    name = "dockergen",
    about = "Generate versioned Dockerfiles for Couchbase images"
)]
#[command(version)]
struct Cli {
    /// Root of the docker repository
    base_directory: PathBuf,
    /// Product name (single mode)
    #[arg(long, short = 'p', requires_all = ["product_version", "edition", "output"])]
    product: Option<String>,
    /// Product version (single mode)
    #[arg(long, short = 'v', requires = "product")]
    product_version: Option<String>,
    /// Product edition: community or enterprise (single mode)
    #[arg(long, short = 'e', requires = "product")]
    edition: Option<Edition>,
    /// Directory to write the Dockerfile to; must exist (single mode)
    #[arg(long, short = 'o', value_name = "OUTPUT_DIRECTORY", requires = "product")]
    output: Option<PathBuf>,
    /// KEY=VALUE to provide to the template (single mode, repeatable)
    #[arg(
        long = "template-arg",
        short = 't',
        value_name = "KEY=VALUE",
        requires = "product",
        value_parser = commands::parse_template_arg
    )]
    template_args: Vec<(String, String)>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match (cli.product, cli.product_version, cli.edition, cli.output) {
        (Some(product), Some(version), Some(edition), Some(output)) => {
            tracing::info!("Generating single product");
            commands::generate_one(
                &cli.base_directory,
                &product,
                &version,
                edition,
                &output,
                cli.template_args,
            )
            .await?
        }
        _ => {
            tracing::info!("Generating multiple products");
            commands::generate_all(&cli.base_directory).await?
        }
    }

    tracing::info!("Successfully finished!");
    Ok(())
}
