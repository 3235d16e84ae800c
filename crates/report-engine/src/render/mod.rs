//! Report rendering
//!
//! Lays out the summary page and the photo pages on a [`Canvas`], then
//! serializes the canvas to PDF. Layout is pure; the only I/O is through the
//! [`PhotoSource`] the caller supplies.

mod flow;
mod header;
mod photo_pages;
mod summary;

use chrono::{NaiveDate, Utc};
use report_types::ReportBundle;
use serde::Serialize;
use tracing::info;

use crate::boilerplate::{format_date, report_filename, report_number};
use crate::canvas::Canvas;
use crate::config::{LayoutConfig, ReportConfig};
use crate::error::ReportError;
use crate::pdf::write_pdf;
use crate::photos::PhotoSource;

pub use summary::SummaryContent;

/// Values computed once per report and shared by every page
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub bundle: &'a ReportBundle,
    pub layout: &'a LayoutConfig,
    pub report_number: String,
    pub report_date: String,
}

impl<'a> ReportContext<'a> {
    pub fn new(bundle: &'a ReportBundle, layout: &'a LayoutConfig, today: NaiveDate) -> Self {
        Self {
            bundle,
            layout,
            report_number: report_number(bundle, today),
            report_date: format_date(bundle.report_date()),
        }
    }
}

/// A finished report
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub filename: String,
    pub page_count: usize,
}

/// Lay out every page of the report without serializing it
pub fn layout_report(
    bundle: &ReportBundle,
    config: &ReportConfig,
    photos: &dyn PhotoSource,
    today: NaiveDate,
) -> Canvas {
    let ctx = ReportContext::new(bundle, &config.layout, today);
    let mut canvas = Canvas::new(config.layout.page);

    summary::draw_summary(&mut canvas, &ctx);
    let photo_page_count = photo_pages::draw_photo_pages(&mut canvas, &ctx, photos);

    info!(
        inspection_id = bundle.inspection.id,
        report_number = %ctx.report_number,
        photo_pages = photo_page_count,
        pages = canvas.page_count(),
        "Report laid out"
    );
    canvas
}

/// Render the bundle to PDF bytes, with the download file name and the
/// page count
pub fn render_report(
    bundle: &ReportBundle,
    config: &ReportConfig,
    photos: &dyn PhotoSource,
) -> Result<RenderedReport, ReportError> {
    render_report_on(bundle, config, photos, Utc::now().date_naive())
}

/// [`render_report`] with a fixed "today", used for report numbers built
/// from the current year
pub fn render_report_on(
    bundle: &ReportBundle,
    config: &ReportConfig,
    photos: &dyn PhotoSource,
    today: NaiveDate,
) -> Result<RenderedReport, ReportError> {
    let canvas = layout_report(bundle, config, photos, today);
    let bytes = write_pdf(&canvas)?;

    let report = RenderedReport {
        bytes,
        filename: report_filename(&bundle.vessel.tag_no),
        page_count: canvas.page_count(),
    };
    info!(
        filename = %report.filename,
        pages = report.page_count,
        bytes = report.bytes.len(),
        "Report rendered"
    );
    Ok(report)
}
