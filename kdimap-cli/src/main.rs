mod args;
mod pipeline;
mod profile;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::Args;
use kdimap_client::ScorecardClient;
use kdimap_core::{Diagnostic, NormalizeOutcome};
use kdimap_mapping::StaticMapper;
use kdimap_output::{ConnectorUploader, OutputManager};
use profile::{RunProfile, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing based on verbosity
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let profile = match &args.config {
        Some(path) => profile::load_profile(path)?,
        None => RunProfile::default(),
    };
    let settings = Settings::resolve(&args, profile)?;

    if args.debug {
        eprintln!("Debug mode: only fetching a fixed subset of issue types");
    }

    let outcome = collect(&settings).await?;
    report(&outcome);

    let path = OutputManager::new(settings.output.clone())
        .write(&outcome.document)
        .context("failed to write KDI output")?;
    eprintln!("Output is available at: {}", path.display());

    match settings.connector {
        Some(connector) => {
            let connector_id = connector.connector_id;
            let uploader =
                ConnectorUploader::new(connector).context("failed to create connector client")?;
            let receipt = uploader
                .upload(&path)
                .await
                .with_context(|| format!("failed to upload to connector {connector_id}"))?;
            match receipt.connector_run_id {
                Some(run_id) => eprintln!("Uploaded to connector {connector_id} (run {run_id})"),
                None => eprintln!("Uploaded to connector {connector_id}"),
            }
        }
        None => info!("no connector configured, skipping upload"),
    }

    Ok(())
}

async fn collect(settings: &Settings) -> Result<NormalizeOutcome> {
    let client = ScorecardClient::new(settings.scorecard.clone())
        .context("failed to create SecurityScorecard client")?;
    let outcome = pipeline::collect_document(
        &client,
        StaticMapper::bundled(),
        settings.portfolio.clone(),
        settings.issue_filter.as_ref(),
    )
    .await?;
    Ok(outcome)
}

fn report(outcome: &NormalizeOutcome) {
    let stats = &outcome.stats;
    eprintln!(
        "Normalized {} findings: {} assets, {} vuln defs ({} skipped)",
        stats.findings,
        outcome.document.assets.len(),
        outcome.document.vuln_defs.len(),
        stats.skipped_malformed,
    );
    if stats.unmapped_assets > 0 {
        warn!(count = stats.unmapped_assets, "findings with no identifying field");
    }
    for diagnostic in &outcome.diagnostics {
        if let Diagnostic::UnknownIssueType { issue_type } = diagnostic {
            warn!(issue_type = %issue_type, "issue type has no canonical mapping");
        }
    }
}
