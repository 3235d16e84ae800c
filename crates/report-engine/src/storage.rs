//! Report generation to the uploads directory

use std::path::PathBuf;
use std::sync::Arc;

use report_types::ReportBundle;
use serde::Serialize;
use tracing::info;

use crate::boilerplate::report_url;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::photos::PhotoSource;
use crate::render::render_report;

/// Where a generated report ended up
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub filename: String,
    pub url: String,
    pub path: PathBuf,
    pub page_count: usize,
}

/// Render the report on a blocking task and write it to
/// `<uploads_root>/reports/`. Resolves once the file is fully written.
/// An existing report with the same name is replaced.
pub async fn generate_report(
    bundle: ReportBundle,
    config: &ReportConfig,
    source: Arc<dyn PhotoSource>,
) -> Result<GeneratedReport, ReportError> {
    let render_config = config.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        render_report(&bundle, &render_config, source.as_ref())
    })
    .await
    .map_err(|e| ReportError::TaskFailed(format!("Render task panicked: {}", e)))??;

    let reports_dir = config.reports_dir();
    tokio::fs::create_dir_all(&reports_dir).await?;
    let path = reports_dir.join(&rendered.filename);
    tokio::fs::write(&path, &rendered.bytes).await?;

    let url = report_url(&config.storage.public_prefix, &rendered.filename);
    info!(
        path = %path.display(),
        pages = rendered.page_count,
        "Report written"
    );

    Ok(GeneratedReport {
        filename: rendered.filename,
        url,
        path,
        page_count: rendered.page_count,
    })
}
