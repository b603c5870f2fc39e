//! Concept Forge CLI
//!
//! Runs one generation for a concept description and prints the result as
//! pretty JSON. Logs go to stderr; filter them with `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use concept_forge::models::GenerationRequest;
use concept_forge::services::GenerationPipeline;
use concept_forge::storage::ForgeConfig;
use concept_forge_quality_gates::{ArtifactKind, Strictness};

/// Generate a business document or HTML prototype from a concept.
#[derive(Debug, Parser)]
#[command(name = "concept-forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Produce a single-page HTML prototype instead of a document.
    #[arg(long)]
    prototype: bool,

    /// Config file (default: ~/.concept-forge/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Domain category hint (saas, marketplace, storefront, ...).
    #[arg(long)]
    domain: Option<String>,

    /// Additional requirements.
    #[arg(long)]
    requirements: Option<String>,

    /// Style direction passed to the generator.
    #[arg(long)]
    style: Option<String>,

    /// Use strict heuristic penalties.
    #[arg(long)]
    strict: bool,

    /// Concept description.
    #[arg(required = true, num_args = 1..)]
    description: Vec<String>,
}

impl Cli {
    fn request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.description.join(" "));
        request.domain_hint = self.domain.clone();
        request.requirements = self.requirements.clone();
        request.options.style = self.style.clone();
        if self.prototype {
            request.options.kind = ArtifactKind::Prototype;
        }
        if self.strict {
            request.options.strictness = Strictness::Strict;
        }
        request
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ForgeConfig::load(path),
        None => ForgeConfig::load_default(),
    }
    .context("failed to load configuration")?;

    let pipeline = GenerationPipeline::from_config(&config).context("failed to build pipeline")?;

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let result = pipeline
        .generate_with_cancel(&cli.request(), token)
        .await
        .context("generation failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
