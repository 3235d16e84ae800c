//! Inspection report generator
//!
//! Reads a report bundle (inspection, vessel, observations, photos and
//! people) as JSON, renders the PDF report into `<uploads_root>/reports/`
//! and prints where it went as JSON on stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use report_engine::{generate_report, DiskPhotoSource, ReportConfig};
use report_types::ReportBundle;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the report generator
#[derive(Parser, Debug)]
#[command(name = "report-cli")]
#[command(about = "Generate a pressure vessel inspection report PDF")]
struct Args {
    /// Report bundle JSON file
    bundle: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Uploads root; overrides the configuration file
    #[arg(long)]
    uploads_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> anyhow::Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if let Some(root) = &args.uploads_root {
        config.storage.uploads_root = root.clone();
    }
    config.validate()?;
    Ok(config)
}

fn load_bundle(path: &Path) -> anyhow::Result<ReportBundle> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bundle: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bundle: {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the result JSON
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&args)?;
    let bundle = load_bundle(&args.bundle)?;
    info!(
        inspection_id = bundle.inspection.id,
        tag = %bundle.vessel.tag_no,
        observations = bundle.observations.len(),
        photos = bundle.photos.len(),
        "Generating report"
    );

    let source = Arc::new(DiskPhotoSource::new(
        config.photos_dir(),
        config.images.max_edge_px,
    ));
    let report = generate_report(bundle, &config, source)
        .await
        .context("Report generation failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uploads_root_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("report.toml");
        std::fs::write(
            &config_path,
            "[storage]\nuploads_root = \"/srv/uploads\"\npublic_prefix = \"/files\"\n",
        )
        .unwrap();

        let args = Args::parse_from([
            "report-cli",
            "bundle.json",
            "--config",
            config_path.to_str().unwrap(),
            "--uploads-root",
            "/tmp/elsewhere",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.storage.uploads_root, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.storage.public_prefix, "/files");
    }

    #[test]
    fn test_bundle_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_bundle(&path).unwrap_err();
        assert!(err.to_string().contains("bundle.json"));
    }
}
